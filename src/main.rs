//! FlashBricks backend status checker entry point.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use flashbricks_client::api::ApiClient;
use flashbricks_client::config::{BuildMode, Config};
use flashbricks_client::metrics;
use flashbricks_client::status::{ApiStatus, StatusPanel};

/// FlashBricks backend status checker.
#[derive(Parser, Debug)]
#[command(name = "flashbricks")]
#[command(about = "Check that the FlashBricks backend is reachable")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Build mode selecting the backend (defaults to the binary's own).
    #[arg(long, global = true)]
    mode: Option<BuildMode>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one health check and print the status (default).
    Check,

    /// Print the resolved backend endpoints.
    Endpoints,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load()?;
    if let Some(mode) = args.mode {
        config.build_mode = Some(mode);
    }

    // Initialize logging
    let filter = if args.verbose || config.verbose {
        EnvFilter::new("flashbricks_client=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.rust_log))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Initialize metrics
    metrics::init_metrics();

    match args.command.unwrap_or(Command::Check) {
        Command::Check => cmd_check(&config).await,
        Command::Endpoints => cmd_endpoints(&config),
    }
}

/// Mount the status panel and print the status before and after the check.
///
/// A failed check is a displayed status, not a process failure.
async fn cmd_check(config: &Config) -> anyhow::Result<()> {
    let endpoints = config.endpoints();
    info!(
        mode = %config.build_mode(),
        url = %endpoints.health(),
        "Checking backend health"
    );

    let client = Arc::new(ApiClient::new(endpoints)?);
    let mut panel = StatusPanel::mount(client);

    println!("{}", panel.status());
    let status = panel.settled().await;
    println!("{}", status);

    if status == ApiStatus::Failed {
        info!("Backend unreachable");
    }

    Ok(())
}

/// Print the resolved endpoints.
fn cmd_endpoints(config: &Config) -> anyhow::Result<()> {
    let endpoints = config.endpoints();
    println!("Build mode: {}", config.build_mode());
    println!("Base URL:   {}", endpoints.base_url());
    println!("Health URL: {}", endpoints.health());
    Ok(())
}
