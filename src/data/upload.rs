//! Upload Parsing
//!
//! Reads a CSV with a `country` column plus any number of numeric metric
//! columns. Column order is preserved: it decides chart stacking order and
//! palette assignment downstream.

use super::error::{UploadError, UploadResult};
use serde::Serialize;
use std::path::Path;

/// Header of the join-key column
pub const COUNTRY_COLUMN: &str = "country";

/// Trim and capitalize a country name: first character upper-case, the
/// remainder lower-case. Applied to both sides of the join.
pub fn normalize_name(name: &str) -> String {
    let mut chars = name.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// One uploaded row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadRecord {
    /// Country name exactly as uploaded
    pub country: String,
    /// Normalized join key
    pub key: String,
    /// One entry per metric column, `None` for empty cells
    pub metrics: Vec<Option<f64>>,
}

impl UploadRecord {
    pub fn new(country: impl Into<String>, metrics: Vec<Option<f64>>) -> Self {
        let country = country.into();
        let key = normalize_name(&country);
        Self {
            country,
            key,
            metrics,
        }
    }
}

/// Parsed upload: ordered metric columns and their rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadTable {
    pub metric_columns: Vec<String>,
    pub records: Vec<UploadRecord>,
}

impl UploadTable {
    /// Parse CSV bytes.
    pub fn parse(data: &[u8]) -> UploadResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(data);

        let headers = reader.headers()?.clone();
        let country_idx = headers
            .iter()
            .position(|h| h == COUNTRY_COLUMN)
            .ok_or(UploadError::MissingCountryColumn)?;

        let metric_idx: Vec<usize> = (0..headers.len()).filter(|&i| i != country_idx).collect();
        let metric_columns: Vec<String> = metric_idx
            .iter()
            .map(|&i| headers[i].to_string())
            .collect();

        let mut records = Vec::new();
        for (line_num, result) in reader.records().enumerate() {
            let row = line_num + 2;
            let record = result?;

            if record.len() > headers.len() {
                return Err(UploadError::RowLength {
                    row,
                    expected: headers.len(),
                    found: record.len(),
                });
            }

            let country = record.get(country_idx).unwrap_or_default();

            let mut metrics = Vec::with_capacity(metric_idx.len());
            for (col, &idx) in metric_idx.iter().enumerate() {
                let cell = record.get(idx).unwrap_or_default();
                metrics.push(parse_metric(cell).ok_or_else(|| UploadError::InvalidNumber {
                    row,
                    column: metric_columns[col].clone(),
                    value: cell.to_string(),
                })?);
            }

            records.push(UploadRecord::new(country, metrics));
        }

        tracing::debug!(
            rows = records.len(),
            metrics = metric_columns.len(),
            "Parsed upload"
        );

        Ok(Self {
            metric_columns,
            records,
        })
    }

    /// Parse a CSV file from disk.
    pub fn from_path(path: &Path) -> UploadResult<Self> {
        let data = std::fs::read(path)?;
        Self::parse(&data)
    }

    /// Serialize back to CSV with the `country` column first.
    pub fn to_csv(&self) -> UploadResult<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        let mut header = vec![COUNTRY_COLUMN.to_string()];
        header.extend(self.metric_columns.iter().cloned());
        writer.write_record(&header)?;

        for record in &self.records {
            let mut row = vec![record.country.clone()];
            row.extend(record.metrics.iter().map(|m| format_metric(*m)));
            writer.write_record(&row)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| UploadError::Io(e.into_error()))?;
        String::from_utf8(bytes)
            .map_err(|e| UploadError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// `Some(None)` for an empty or NaN cell, `None` when the cell is not a
/// finite number.
fn parse_metric(cell: &str) -> Option<Option<f64>> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Some(None);
    }
    let value: f64 = cell.parse().ok()?;
    if value.is_nan() {
        Some(None)
    } else if value.is_infinite() {
        None
    } else {
        Some(Some(value))
    }
}

/// Render a metric cell for display or CSV output.
pub fn format_metric(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  india "), "India");
        assert_eq!(normalize_name("UNITED STATES"), "United states");
        assert_eq!(normalize_name("united States"), "United states");
        assert_eq!(normalize_name("éthiopie"), "Éthiopie");
        assert_eq!(normalize_name("   "), "");
    }

    #[test]
    fn test_normalized_key_matches_trimmed_capitalized() {
        let cases = [
            ("India", "India"),
            (" nepal", "Nepal"),
            ("BANGLADESH  ", "Bangladesh"),
            ("dRC", "Drc"),
            ("côte d'Ivoire", "Côte d'ivoire"),
        ];

        for (raw, expected) in cases {
            let record = UploadRecord::new(raw, vec![]);
            assert_eq!(record.key, expected);
            assert_eq!(record.country, raw);
        }
    }

    #[test]
    fn test_parse_simple_upload() {
        let csv_data = "country,Cardiovascular,Child Health
India,10,4
Nepal,3,2";

        let table = UploadTable::parse(csv_data.as_bytes()).unwrap();

        assert_eq!(table.metric_columns, vec!["Cardiovascular", "Child Health"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[0].key, "India");
        assert_eq!(table.records[0].metrics, vec![Some(10.0), Some(4.0)]);
        assert_eq!(table.records[1].metrics, vec![Some(3.0), Some(2.0)]);
    }

    #[test]
    fn test_country_column_anywhere() {
        let csv_data = "a,country,b\n1,kenya,2\n";
        let table = UploadTable::parse(csv_data.as_bytes()).unwrap();

        assert_eq!(table.metric_columns, vec!["a", "b"]);
        assert_eq!(table.records[0].key, "Kenya");
        assert_eq!(table.records[0].metrics, vec![Some(1.0), Some(2.0)]);
    }

    #[test]
    fn test_missing_values_are_none() {
        let csv_data = "country,x,y,z
Rwanda,,1,NaN
Uganda,2";

        let table = UploadTable::parse(csv_data.as_bytes()).unwrap();

        assert_eq!(table.records[0].metrics, vec![None, Some(1.0), None]);
        assert_eq!(table.records[1].metrics, vec![Some(2.0), None, None]);
    }

    #[test]
    fn test_infinite_metric_rejected() {
        for cell in ["inf", "-infinity", "1e400"] {
            let csv_data = format!("country,a,b\nIndia,1,{}\n", cell);
            let err = UploadTable::parse(csv_data.as_bytes()).unwrap_err();
            match err {
                UploadError::InvalidNumber { row, column, value } => {
                    assert_eq!(row, 2);
                    assert_eq!(column, "b");
                    assert_eq!(value, cell);
                }
                other => panic!("unexpected error for {cell}: {other}"),
            }
        }
    }

    #[test]
    fn test_missing_country_column() {
        let err = UploadTable::parse(b"name,x\nIndia,1\n").unwrap_err();
        assert!(matches!(err, UploadError::MissingCountryColumn));
    }

    #[test]
    fn test_non_numeric_metric() {
        let err = UploadTable::parse(b"country,x\nIndia,lots\n").unwrap_err();
        match err {
            UploadError::InvalidNumber { row, column, value } => {
                assert_eq!(row, 2);
                assert_eq!(column, "x");
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_row_too_long() {
        let err = UploadTable::parse(b"country,x\nIndia,1,2\n").unwrap_err();
        assert!(matches!(
            err,
            UploadError::RowLength {
                row: 2,
                expected: 2,
                found: 3
            }
        ));
    }

    #[test]
    fn test_header_only() {
        let table = UploadTable::parse(b"country,x,y\n").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.metric_columns.len(), 2);
    }

    #[test]
    fn test_to_csv() {
        let table = UploadTable {
            metric_columns: vec!["a".to_string(), "b c".to_string()],
            records: vec![UploadRecord::new("India", vec![Some(10.0), None])],
        };

        assert_eq!(table.to_csv().unwrap(), "country,a,b c\nIndia,10,\n");
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("upload.csv");
        std::fs::write(&path, "country,x\nNepal,1.5\n").unwrap();

        let table = UploadTable::from_path(&path).unwrap();
        assert_eq!(table.records[0].metrics, vec![Some(1.5)]);
    }
}
