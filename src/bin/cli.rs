//! Healthmap CLI
//!
//! Offline operations without starting the server:
//! - Render an upload to a standalone HTML page (or map view JSON)
//! - Write the sample dataset
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use healthmap::config::{generate_default_config, Config};
use healthmap::data::{sample_csv, UploadTable};
use healthmap::geo::source_from_config;
use healthmap::logging::init_tracing;
use healthmap::map::{html, FlowError, MapRenderer};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "healthmap-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render per-country health metrics onto a world map")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a CSV upload to an HTML page
    Render {
        /// Path to CSV file (country + metric columns)
        input: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write the map view as JSON instead of HTML
        #[arg(long)]
        json: bool,
        /// Boundary GeoJSON URL or file path (overrides config)
        #[arg(long)]
        boundaries: Option<String>,
    },

    /// Write the sample dataset CSV
    Sample {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::from_env(),
    };

    match cli.command {
        Commands::Render {
            input,
            output,
            json,
            boundaries,
        } => {
            if let Some(url) = boundaries {
                config.boundaries.url = url;
            }
            init_tracing(&config.logging);

            let upload = UploadTable::from_path(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let source = source_from_config(&config.boundaries)?;
            let renderer = MapRenderer::new(config.map.clone());

            let view = match renderer.run(&upload, source.as_ref()).await {
                Ok(view) => view,
                Err(FlowError::Boundaries(e)) => {
                    eprintln!("Error loading GeoJSON data: {}", e);
                    std::process::exit(2);
                }
                Err(e) => return Err(e.into()),
            };

            let rendered = if json {
                serde_json::to_string_pretty(&view)?
            } else {
                html::map_page(&view)?
            };
            write_output(output.as_deref(), &rendered)?;

            eprintln!(
                "{} of {} countries matched, {} markers",
                view.summary.matched, view.summary.countries, view.summary.markers
            );
        }

        Commands::Sample { output } => {
            write_output(output.as_deref(), &sample_csv()?)?;
        }

        Commands::Config { output } => {
            write_output(output.as_deref(), &generate_default_config())?;
        }
    }

    Ok(())
}

fn write_output(path: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("writing {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}
