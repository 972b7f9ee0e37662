//! Uploaded Data
//!
//! Parsing of the user's per-country metric table and the bundled
//! sample dataset offered for download.

mod error;
pub mod sample;
pub mod upload;

pub use error::{UploadError, UploadResult};
pub use sample::{sample_csv, sample_table, SAMPLE_FILE_NAME};
pub use upload::{normalize_name, UploadRecord, UploadTable, COUNTRY_COLUMN};
