//! Sample Dataset
//!
//! A small demonstration table offered as a CSV download so users can see
//! the expected upload shape. Built once and memoized.

use super::error::UploadResult;
use super::upload::{UploadRecord, UploadTable};
use once_cell::sync::Lazy;

/// File name suggested for the sample download
pub const SAMPLE_FILE_NAME: &str = "sample_country_data.csv";

const SAMPLE_COLUMNS: [&str; 6] = [
    "Cardiovascular",
    "Child Health",
    "Respiratory",
    "Maternal Health",
    "Neonatal Health",
    "Other",
];

const SAMPLE_ROWS: [(&str, [f64; 6]); 10] = [
    ("India", [10.0, 4.0, 3.0, 0.0, 0.0, 0.0]),
    ("Pakistan", [5.0, 6.0, 2.0, 0.0, 0.0, 0.0]),
    ("Nepal", [3.0, 2.0, 4.0, 0.0, 0.0, 0.0]),
    ("Bangladesh", [7.0, 5.0, 3.0, 0.0, 0.0, 0.0]),
    ("Uganda", [1.0, 1.0, 2.0, 0.0, 0.0, 0.0]),
    ("Ethiopia", [0.0, 1.0, 3.0, 0.0, 1.0, 0.0]),
    ("Kenya", [0.0, 3.0, 2.0, 0.0, 0.0, 0.0]),
    ("Tanzania", [0.0, 0.0, 4.0, 1.0, 1.0, 0.0]),
    ("DRC", [0.0, 0.0, 2.0, 0.0, 0.0, 0.0]),
    ("Rwanda", [0.0, 0.0, 0.0, 2.0, 1.0, 1.0]),
];

static SAMPLE: Lazy<UploadTable> = Lazy::new(|| UploadTable {
    metric_columns: SAMPLE_COLUMNS.iter().map(|c| c.to_string()).collect(),
    records: SAMPLE_ROWS
        .iter()
        .map(|(country, values)| {
            UploadRecord::new(*country, values.iter().copied().map(Some).collect())
        })
        .collect(),
});

/// The memoized sample table
pub fn sample_table() -> &'static UploadTable {
    &SAMPLE
}

/// The sample table as CSV text
pub fn sample_csv() -> UploadResult<String> {
    sample_table().to_csv()
}
