use crate::diagnostics::ScanSummary;
use crate::taxonomy::Priority;

/// One classified rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Rule identifier, the last segment of `category_full`
    pub rule: String,
    /// Path of the offending file, `"unknown"` when the linter gave none
    pub file: String,
    /// The linter's own severity (error, warning, info)
    pub severity: String,
    pub description: String,
    /// Raw slash-delimited category, e.g. `lint/correctness/noUnreachable`
    pub category_full: String,
    pub priority: Priority,
    pub category: &'static str,
}

/// Diagnostics of one category, in input order.
///
/// Entries are indices into [`AnalysisResult::issues`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryIssues {
    pub category: &'static str,
    pub issues: Vec<usize>,
}

/// Categories of one priority, in the order they were first populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityIssues {
    pub priority: Priority,
    pub categories: Vec<CategoryIssues>,
}

impl PriorityIssues {
    pub fn total(&self) -> usize {
        self.categories.iter().map(|c| c.issues.len()).sum()
    }
}

/// Diagnostics referencing one file, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileIssues {
    pub file: String,
    pub issues: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleCount {
    pub rule: String,
    pub count: usize,
}

/// Aggregated, read-only view of one diagnostics dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    /// Every diagnostic, in input order
    pub issues: Vec<Diagnostic>,
    /// Non-empty priorities, ordered CRITICAL through UNKNOWN
    pub by_priority: Vec<PriorityIssues>,
    /// Files in the order they were first seen
    pub by_file: Vec<FileIssues>,
    /// Rules in the order they were first seen
    pub rule_counts: Vec<RuleCount>,
    pub summary: ScanSummary,
    pub total_issues: usize,
}

/// Diagnostics of one rule within a category, with its distinct files.
#[derive(Debug)]
pub struct RuleGroup<'a> {
    pub rule: &'a str,
    pub issues: Vec<&'a Diagnostic>,
    /// Distinct affected files, first-seen order
    pub files: Vec<&'a str>,
}

impl<'a> RuleGroup<'a> {
    /// The first occurrence, used as the representative entry.
    pub fn first(&self) -> &'a Diagnostic {
        self.issues[0]
    }
}
