//! Upload error types

use thiserror::Error;

/// Errors raised while reading an uploaded table
#[derive(Error, Debug)]
pub enum UploadError {
    /// The CSV reader rejected the input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// No header named `country`
    #[error("Missing required column 'country'")]
    MissingCountryColumn,

    /// A data row has more fields than the header
    #[error("Row {row}: expected {expected} fields, found {found}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A metric cell could not be read as a number
    #[error("Row {row}, column '{column}': '{value}' is not a number")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for upload parsing
pub type UploadResult<T> = Result<T, UploadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = UploadError::InvalidNumber {
            row: 3,
            column: "Respiratory".to_string(),
            value: "many".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Row 3, column 'Respiratory': 'many' is not a number"
        );

        assert_eq!(
            UploadError::MissingCountryColumn.to_string(),
            "Missing required column 'country'"
        );
    }
}
