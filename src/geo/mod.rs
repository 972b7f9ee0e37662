//! Country Boundaries
//!
//! The reference dataset the upload is joined against: one named
//! polygon/multipolygon per country, read from a GeoJSON FeatureCollection.
//!
//! - [`geometry`]: outlines, validity and centroids
//! - [`boundary`]: FeatureCollection parsing into [`BoundaryRecord`]s
//! - [`source`]: where the collection comes from (HTTP, file, memory)

pub mod boundary;
mod error;
pub mod geometry;
pub mod source;

pub use boundary::{parse_feature_collection, BoundaryRecord, FALLBACK_NAME_PROPERTY};
pub use error::{BoundaryError, BoundaryResult};
pub use geometry::{Geometry, Position, Ring};
pub use source::{
    source_from_config, BoundarySource, FileBoundarySource, HttpBoundarySource,
    StaticBoundarySource,
};
