//! devops-info-service entry point.
//!
//! Loads configuration (defaults, optional TOML file, then environment
//! overrides), initializes tracing, captures the process start time, builds
//! the Axum router and serves until a shutdown signal arrives.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use devops_info_service::clock::{format_utc, ProcessClock};
use devops_info_service::config::{AppConfig, LogFormat};
use devops_info_service::http::start_server;
use devops_info_service::routes::create_router;
use devops_info_service::state::AppState;

/// devops-info-service: service, system and runtime information over HTTP
#[derive(Parser, Debug)]
#[command(name = "devops-info-service", version, about)]
struct Args {
    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Log level filter (e.g., "devops_info_service=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Configuration comes first: DEBUG and LOG_FORMAT shape the subscriber
    let config = AppConfig::load(args.config.as_deref())?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| config.default_log_filter().to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    match config.logging.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    let clock = ProcessClock::start();

    tracing::info!(
        app = %config.service.name,
        version = %config.service.version,
        debug = config.http.debug,
        started_at = %format_utc(clock.started_at()),
        "Application starting"
    );

    let state = AppState::new(config.clone(), clock);
    let app = create_router(state);

    start_server(app, &config).await?;

    Ok(())
}
