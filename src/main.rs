//! Kumoweb main entry point
//!
//! Command-line interface for running and validating scrape jobs.

use clap::{Parser, Subcommand};
use kumoweb::config::{load_config, ScrapeConfig};
use kumoweb::scrape::scrape;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Kumoweb: a polite, config-driven web scraper
///
/// Fetches pages under per-domain rate limits and robots.txt rules,
/// follows pagination, and exports extracted records.
#[derive(Parser, Debug)]
#[command(name = "kumoweb")]
#[command(version = "1.0.0")]
#[command(about = "A polite, config-driven web scraper", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a scrape job from a TOML config file
    Run {
        /// Path to the job config
        config: PathBuf,
    },

    /// Validate a config without running it
    Validate {
        /// Path to the job config
        config: PathBuf,
    },

    /// List scrape configs in a directory
    ListConfigs {
        /// Directory containing config files
        #[arg(long, default_value = "./configs")]
        dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Run { config } => handle_run(&config).await,
        Command::Validate { config } => handle_validate(&config),
        Command::ListConfigs { dir } => handle_list_configs(&dir),
    }
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("kumoweb=info,warn"),
            1 => EnvFilter::new("kumoweb=debug,info"),
            2 => EnvFilter::new("kumoweb=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the run subcommand: executes a scrape job
async fn handle_run(config_path: &PathBuf) -> anyhow::Result<()> {
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Config error: {}", err);
            std::process::exit(1);
        }
    };

    println!("Running scrape: {}", config.name);
    println!("  Base URL: {}", config.base_url);
    println!("  URLs: {}", config.urls.len());
    println!("  Parser: {}", config.selectors.parser);
    println!(
        "  Export: {} -> {}",
        config.export.format, config.export.output
    );
    println!();

    let result = scrape(&config).await?;

    println!("=== Scrape Results ===");
    println!("  URLs scraped: {}", result.urls_scraped);
    println!("  Items found:  {}", result.items_found);
    println!("  Errors:       {}", result.errors);
    println!("  Duration:     {:.2}s", result.duration.as_secs_f64());

    if result.errors > 0 {
        println!("\nCompleted with {} error(s)", result.errors);
    } else {
        println!("\n✓ Completed successfully");
    }

    Ok(())
}

/// Handles the validate subcommand: checks a config without any network activity
fn handle_validate(config_path: &PathBuf) -> anyhow::Result<()> {
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Invalid config: {}", err);
            std::process::exit(1);
        }
    };

    print_config(&config);
    println!("\n✓ Config is valid");
    Ok(())
}

fn print_config(config: &ScrapeConfig) {
    println!("Config: {}", config.name);
    println!("  Base URL: {}", config.base_url);
    println!("  URLs: {}", config.urls.len());
    println!("  Parser: {}", config.selectors.parser);
    println!("  Items selector: {}", config.selectors.items);
    println!("  Fields: {}", config.selectors.fields.len());
    println!("  Pagination: {}", config.pagination.enabled);
    println!(
        "  Rate limit: {} req/s (burst {})",
        config.rate_limit.requests_per_second, config.rate_limit.burst
    );
    println!("  Max attempts: {}", config.retry.max_attempts);
    println!(
        "  Export: {} -> {}",
        config.export.format, config.export.output
    );
}

/// Handles the list-configs subcommand
fn handle_list_configs(dir: &PathBuf) -> anyhow::Result<()> {
    if !dir.is_dir() {
        eprintln!("Directory not found: {}", dir.display());
        std::process::exit(1);
    }

    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();

    if paths.is_empty() {
        println!("No config files found in {}", dir.display());
        return Ok(());
    }

    for path in paths {
        let file = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        match load_config(&path) {
            Ok(config) => println!(
                "{}  {}  {}  {}",
                file, config.name, config.base_url, config.export.format
            ),
            Err(_) => println!("{}  INVALID", file),
        }
    }

    Ok(())
}
