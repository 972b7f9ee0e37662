//! Boundary dataset error types

use thiserror::Error;

/// Errors that can occur while obtaining the boundary dataset
#[derive(Error, Debug)]
pub enum BoundaryError {
    /// Request could not be sent or the body could not be read
    #[error("Request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    /// Body is not a GeoJSON FeatureCollection
    #[error("Invalid GeoJSON: {0}")]
    Parse(String),

    /// Local dataset could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for BoundaryError {
    fn from(err: serde_json::Error) -> Self {
        BoundaryError::Parse(err.to_string())
    }
}

/// Result type alias for boundary operations
pub type BoundaryResult<T> = Result<T, BoundaryError>;
