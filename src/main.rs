//! request-logger demo server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ─────────────────▶ ┌──────────────┐    ┌──────────────┐    ┌──────────┐
//!                        │ LoggingLayer │───▶│ TimeoutLayer │───▶│ handlers │
//!     Client Response    │  (starts the │    └──────────────┘    └────┬─────┘
//!     ◀───────────────── │    clock)    │◀────────────────────────────┘
//!                        └──────┬───────┘
//!                               │ one entry per request
//!                               ▼
//!                        ┌──────────────┐    ┌──────────────┐
//!                        │    Logger    │───▶│ stdout/stderr│
//!                        │ (JSON/human) │    └──────────────┘
//!                        └──────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use request_logger::config::{apply_overrides, load_config, AppConfig, ConfigOverrides};
use request_logger::http::server::shutdown_signal;
use request_logger::http::HttpServer;
use request_logger::Severity;

#[derive(Parser)]
#[command(name = "request-logger")]
#[command(about = "Demo server with structured access logging", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Minimum severity (debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<Severity>,

    /// Emit JSON records regardless of APP_ENV.
    #[arg(long)]
    production: bool,

    /// Override the bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Internal diagnostics; request logs go through the Logger.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "request_logger=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    let config = apply_overrides(
        config,
        ConfigOverrides {
            log_level: cli.log_level,
            production: cli.production,
            bind_address: cli.bind,
        },
    )?;

    tracing::info!(
        bind_address = %config.server.bind_address,
        request_timeout_secs = config.server.request_timeout_secs,
        access_log = config.access_log.enabled,
        "Configuration loaded"
    );

    let defaults = Arc::new(config.logger.build_default());
    let logger = defaults.instance();
    defaults.info(format!(
        "request-logger v{} starting",
        env!("CARGO_PKG_VERSION")
    ));

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    defaults.info(format!("Listening on {}", listener.local_addr()?));

    let server = HttpServer::new(config, logger);
    if let Err(e) = server.run(listener, shutdown_signal()).await {
        defaults.error(request_logger::Message::error(&e));
        return Err(e.into());
    }

    defaults.info("Shutdown complete");
    Ok(())
}
