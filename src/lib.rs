//! # Healthmap
//!
//! Upload a CSV of per-country health-metric counts and see it on a world
//! map: countries with data are shaded, each gets a small stacked-bar
//! thumbnail at its centroid, and a legend names the metric categories.
//!
//! ## Modules
//!
//! - [`data`]: upload parsing and the sample dataset
//! - [`geo`]: country boundaries, geometry, and where they are fetched from
//! - [`map`]: join, styling, chart images and the map view/page
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use healthmap::config::Config;
//! use healthmap::data::UploadTable;
//! use healthmap::geo::source_from_config;
//! use healthmap::map::{html, MapRenderer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let upload = UploadTable::parse(b"country,Cardiovascular,Respiratory\nIndia,10,3\n")?;
//!
//!     let source = source_from_config(&config.boundaries)?;
//!     let renderer = MapRenderer::new(config.map.clone());
//!     let view = renderer.run(&upload, source.as_ref()).await?;
//!
//!     std::fs::write("map.html", html::map_page(&view)?)?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod data;
pub mod geo;
pub mod logging;
pub mod map;

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{
    BoundaryConfig, Config, ConfigError, LoggingConfig, MapConfig, ServerConfig,
};

pub use data::{UploadError, UploadRecord, UploadTable};

pub use geo::{BoundaryError, BoundaryRecord, BoundarySource, Geometry};

pub use map::{FlowError, FlowResult, JoinedRecord, MapRenderer, MapView};
