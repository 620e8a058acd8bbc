mod analysis;
mod config;
mod diagnostics;
mod report;
mod taxonomy;

use clap::Parser;
use colored::Colorize;
use report::{IssueReport, RemediationPlan};
use std::path::PathBuf;
use tracing::{debug, info, info_span};
use tracing_subscriber::EnvFilter;

/// Biome Triage — CLI tool that takes a Biome JSON diagnostics dump and
/// writes a prioritized issue report and a remediation plan.
#[derive(Parser, Debug)]
#[command(name = "biome-triage", version, about)]
struct Cli {
    /// Biome diagnostics JSON (default: biome-diagnostics.json)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output path for the issue report (default: biome-issues-report.md)
    #[arg(long)]
    report: Option<PathBuf>,

    /// Output path for the remediation plan (default: biome-remediation-plan.md)
    #[arg(long)]
    plan: Option<PathBuf>,

    /// Config file to use instead of ./.biome-triage.toml
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("{} {}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    info!("loading configuration");
    let mut config = match cli.config.as_deref() {
        Some(path) => config::Config::load_from(path)?,
        None => config::Config::load()?,
    };
    if let Some(input) = cli.input {
        config.paths.input = input;
    }
    if let Some(report) = cli.report {
        config.paths.report = report;
    }
    if let Some(plan) = cli.plan {
        config.paths.plan = plan;
    }
    debug!(?config, "resolved configuration");

    let _main_span = info_span!("triage", input = %config.paths.input.display()).entered();

    info!("analyzing Biome diagnostics");
    let dump = diagnostics::load(&config.paths.input)?;
    let taxonomy = taxonomy::Taxonomy::builtin();
    debug!(
        rules = taxonomy.rule_count(),
        duplicates = taxonomy.duplicates().len(),
        "loaded rule taxonomy"
    );
    let result = analysis::aggregate(dump.summary, &dump.diagnostics, taxonomy);
    info!(issues = result.total_issues, "analysis complete");

    info!(path = %config.paths.report.display(), "generating issue report");
    let issue_report = IssueReport::new(&config.report, taxonomy);
    report::output(&issue_report, &result, &config.paths.report)?;

    info!(path = %config.paths.plan.display(), "generating remediation plan");
    let plan = RemediationPlan::new(&config.plan);
    report::output(&plan, &result, &config.paths.plan)?;

    report::print_summary(&result);
    Ok(())
}
