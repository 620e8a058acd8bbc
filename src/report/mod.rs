pub mod issues;
pub mod plan;

pub use issues::IssueReport;
pub use plan::RemediationPlan;

use crate::analysis::AnalysisResult;
use crate::taxonomy::Priority;
use colored::Colorize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report file: {0}")]
    FileWrite(#[from] std::io::Error),
}

/// A markdown document rendered from an [`AnalysisResult`].
/// Renderers are pure: the same result always renders the same text.
pub trait Renderer {
    /// Human-readable name of this document (e.g., "issue report")
    fn name(&self) -> &str;

    fn render(&self, result: &AnalysisResult) -> String;
}

/// Render with `renderer` and write the document to `path`.
#[instrument(skip_all, fields(document = renderer.name(), path = %path.display()))]
pub fn output(renderer: &dyn Renderer, result: &AnalysisResult, path: &Path) -> Result<(), ReportError> {
    let document = renderer.render(result);
    debug!(bytes = document.len(), "rendered document");
    write(path, &document)
}

/// Write rendered text to a file, replacing any previous contents.
pub fn write(path: &Path, document: &str) -> Result<(), ReportError> {
    std::fs::write(path, document)?;
    Ok(())
}

/// Print the short run summary: total issues and per-priority counts.
pub fn print_summary(result: &AnalysisResult) {
    println!();
    println!("{}", "Analysis complete!".bold());
    println!("Total issues: {}", result.total_issues);
    for priority in Priority::ACTIONABLE {
        if let Some(group) = result.priority(priority) {
            println!("{}: {} issues", colorize_priority(priority), group.total());
        }
    }
}

/// Helper to colorize a priority label for terminal output.
fn colorize_priority(priority: Priority) -> colored::ColoredString {
    let label = priority.to_string();
    match priority {
        Priority::Critical => label.red().bold(),
        Priority::High => label.yellow().bold(),
        Priority::Medium => label.blue().bold(),
        Priority::Low => label.green().bold(),
        Priority::Unknown => label.dimmed(),
    }
}

/// Capitalize the first letter of every alphabetic run, lowercase the rest.
/// `logic_errors` becomes `Logic_Errors`.
pub(crate) fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;
    for ch in name.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}
