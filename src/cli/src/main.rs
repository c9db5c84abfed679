//! CLI for the Talent Finder.
//!
//! This tool turns a job description into ranked, contactable engineer
//! profiles sourced from GitHub.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use talent_finder::{
    extract_requirements, load_config, FinderConfig, InactivityWindow, RunOutcome, RunOutput,
    RunSummary, Runner, RunnerConfig, RunnerError,
};
use thiserror::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Talent Finder - Rank GitHub engineers against a job description.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the job description text file.
    #[arg(long)]
    job_file: PathBuf,

    /// Where to write the report.
    #[arg(long, default_value = "top_candidates.txt")]
    out: PathBuf,

    /// Optional TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Size of the final ranked list.
    #[arg(long)]
    max_candidates: Option<usize>,

    /// Seed pool budget.
    #[arg(long)]
    seed_pool: Option<usize>,

    /// Minimum account age in years.
    #[arg(long)]
    min_years: Option<f64>,

    /// Recency threshold in days, or "disabled".
    #[arg(long)]
    max_inactive_days: Option<InactivityWindow>,

    /// Minimum stars for searched repos.
    #[arg(long)]
    min_stars: Option<u32>,

    /// Maximum owners added through organization contributors.
    #[arg(long)]
    contributor_cap: Option<usize>,

    /// Print a preview of the top candidates instead of writing the report.
    #[arg(long)]
    dry_run: bool,

    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, default_value = "")]
    token: String,
}

/// Errors from the CLI's own file handling plus the runner's.
#[derive(Debug, Error)]
enum CliError {
    /// Failed to read the job description.
    #[error("Failed to read job file '{}': {source}", path.display())]
    JobFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Run failure.
    #[error(transparent)]
    Runner(#[from] RunnerError),
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    // octocrab's TLS stack needs a process-wide crypto provider
    if rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .is_err()
    {
        debug!("Crypto provider already installed");
    }

    // Parse arguments
    let args = Args::parse();

    // Run the main logic
    match run(args).await {
        Ok(outcome) => {
            if let RunOutput::Preview(preview) = &outcome.output {
                println!("{preview}");
            }
            print_summary(&outcome.summary);

            if outcome.summary.nothing_discovered() {
                ExitCode::from(2)
            } else if outcome.summary.has_failures() {
                ExitCode::from(1)
            } else {
                ExitCode::from(0)
            }
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunOutcome, CliError> {
    let job_text = std::fs::read_to_string(&args.job_file).map_err(|e| CliError::JobFile {
        path: args.job_file.clone(),
        source: e,
    })?;
    let profile = extract_requirements(&job_text);
    info!(
        languages = ?profile.languages(),
        frameworks = ?profile.frameworks(),
        keywords = ?profile.keywords(),
        "Inferred requirements"
    );

    let finder = finder_config(&args).map_err(RunnerError::from)?;
    let config = RunnerConfig::new(args.token, finder, args.dry_run).with_report_path(args.out);
    let runner = Runner::new(config)?;
    Ok(runner.run(&profile).await?)
}

/// Loads the config file, if any, and applies command-line overrides.
fn finder_config(args: &Args) -> Result<FinderConfig, talent_finder::ConfigError> {
    let mut finder = match &args.config {
        Some(path) => load_config(path)?,
        None => FinderConfig::default(),
    };

    if let Some(value) = args.max_candidates {
        finder.max_candidates = value;
    }
    if let Some(value) = args.seed_pool {
        finder.seed_pool = value;
    }
    if let Some(value) = args.min_years {
        finder.min_years = value;
    }
    if let Some(value) = args.max_inactive_days {
        finder.max_inactive_days = value;
    }
    if let Some(value) = args.min_stars {
        finder.min_stars = value;
    }
    if let Some(value) = args.contributor_cap {
        finder.contributor_cap = Some(value);
    }
    Ok(finder)
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Queries built: {}", summary.queries_built);
    println!("  Seed pool: {}", summary.seed_pool_size);
    println!("  Candidates scored: {}", summary.candidates_scored);
    println!("  Candidates ranked: {}", summary.candidates_ranked);
    println!("  Fetch failures: {}", summary.fetch_failures);
    println!("  Malformed records: {}", summary.malformed_records);
    println!("  Discovery: {}", summary.discovery.as_str());
    println!("  Ranking: {}", summary.ranking.as_str());

    println!("\nDiscovery telemetry:");
    for entry in summary.discovery_telemetry.entries() {
        println!("  {}: {}", entry.name, entry.value);
    }
    println!("\nRanking telemetry:");
    for entry in summary.ranking_telemetry.entries() {
        println!("  {}: {}", entry.name, entry.value);
    }
}
