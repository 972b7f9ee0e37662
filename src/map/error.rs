//! Map flow error types

use crate::geo::BoundaryError;
use thiserror::Error;

/// Errors that abort a map render
#[derive(Error, Debug)]
pub enum FlowError {
    /// Boundary dataset could not be loaded
    #[error("Error loading GeoJSON data: {0}")]
    Boundaries(#[from] BoundaryError),

    /// Upload has only the `country` column
    #[error("Upload has no metric columns")]
    NoMetricColumns,

    /// More metric columns than category colors
    #[error("Upload has {columns} metric columns but only {palette} category colors are available")]
    PaletteOverflow { columns: usize, palette: usize },

    /// View could not be serialized for embedding
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for FlowError {
    fn from(err: serde_json::Error) -> Self {
        FlowError::Serialization(err.to_string())
    }
}

/// Result type alias for the map flow
pub type FlowResult<T> = Result<T, FlowError>;
