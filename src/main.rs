//! asin-probe main entry point
//!
//! This is the command-line interface for the asin-probe product page prober.

use anyhow::Context;
use asin_probe::config::{load_config_with_hash, Config};
use asin_probe::output::{render_json, render_outcome};
use asin_probe::{Market, ProbeOutcome, Prober};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// asin-probe: a cache-first product page prober
///
/// Resolves each input (a bare ASIN or a product URL) to its product page,
/// serves it from the local cache when possible, and otherwise fetches and
/// extracts it. Robot-check challenges put the page on a cooldown.
#[derive(Parser, Debug)]
#[command(name = "asin-probe")]
#[command(version)]
#[command(about = "A cache-first product page prober", long_about = None)]
struct Cli {
    /// ASINs or product URLs to probe, one product per input
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<String>,

    /// Marketplace: global, mexico or japan
    #[arg(short, long, default_value = "global")]
    market: Market,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Cache directory (overrides the configuration)
    #[arg(long, value_name = "DIR")]
    cache_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// Exit status when a probe was told to wait or retry
const EXIT_COOLDOWN: u8 = 2;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = load_configuration(cli.config.as_deref())?;
    if let Some(dir) = &cli.cache_dir {
        config.cache.directory = dir.to_string_lossy().into_owned();
    }
    tracing::debug!(
        "Cache: {}, cooldown window: {}s",
        config.cache.directory,
        config.cooldown.window_secs
    );

    let prober = Prober::from_config(&config).context("Failed to build the HTTP client")?;

    let mut status = ExitCode::SUCCESS;
    for input in &cli.inputs {
        match prober.fetch_product(input, cli.market).await {
            Ok(outcome) => {
                if !matches!(outcome, ProbeOutcome::Product(_)) {
                    status = ExitCode::from(EXIT_COOLDOWN);
                }
                if cli.json {
                    println!("{}", render_json(&outcome)?);
                } else if !cli.quiet {
                    print!("{}", render_outcome(&outcome));
                }
            }
            Err(e) => {
                tracing::error!("Probe of '{}' failed: {}", input, e);
                status = ExitCode::FAILURE;
            }
        }
    }

    Ok(status)
}

/// Loads the configuration file if one was given, otherwise the defaults
fn load_configuration(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("asin_probe=info,warn"),
            1 => EnvFilter::new("asin_probe=debug,info"),
            2 => EnvFilter::new("asin_probe=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
