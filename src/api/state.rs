//! Application State
//!
//! Shared state accessible by all handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::config::{Config, ServerConfig};
use crate::geo::{source_from_config, BoundaryResult, BoundarySource};
use crate::map::MapRenderer;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Where country outlines are fetched from on every render
    pub boundaries: Arc<dyn BoundarySource>,
    /// Builds map views from uploads
    pub renderer: MapRenderer,
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create state with an explicit boundary source
    pub fn new(config: &Config, boundaries: Arc<dyn BoundarySource>) -> Self {
        Self {
            boundaries,
            renderer: MapRenderer::new(config.map.clone()),
            config: Arc::new(config.server.clone()),
            start_time: Instant::now(),
        }
    }

    /// Create state with the boundary source named in the configuration
    pub fn from_config(config: &Config) -> BoundaryResult<Self> {
        let boundaries = source_from_config(&config.boundaries)?;
        Ok(Self::new(config, boundaries))
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
