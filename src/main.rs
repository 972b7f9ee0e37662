//! Healthmap Server
//!
//! Run with: cargo run --bin healthmap
//!
//! # Configuration
//!
//! Config file (first found): `--config <path>`,
//! `~/.config/healthmap/config.toml`, `/etc/healthmap/config.toml`,
//! `./config.toml`.
//!
//! Environment variables:
//! - `HEALTHMAP_HOST`: Host to bind to (default: 0.0.0.0)
//! - `HEALTHMAP_PORT`: Port to listen on (default: 8501)
//! - `HEALTHMAP_BOUNDARY_URL`: GeoJSON URL or file path of country boundaries
//! - `HEALTHMAP_LOG_LEVEL`, `HEALTHMAP_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Full tracing filter (overrides the level)

use anyhow::Context;
use clap::Parser;
use healthmap::api::{serve, AppState};
use healthmap::config::Config;
use healthmap::logging::init_tracing;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "healthmap")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Serve the interactive health-metric map dashboard")]
struct Args {
    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Boundary GeoJSON URL or file path (overrides config)
    #[arg(long)]
    boundaries: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_default(),
    };

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(url) = args.boundaries {
        config.boundaries.url = url;
    }

    init_tracing(&config.logging);

    tracing::info!("Starting Healthmap server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Boundary dataset: {}", config.boundaries.url);

    let state = AppState::from_config(&config).context("creating boundary source")?;

    serve(state, &config.server).await?;

    tracing::info!("Healthmap server stopped");
    Ok(())
}
