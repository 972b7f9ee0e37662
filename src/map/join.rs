//! Boundary/upload join
//!
//! Left join of the boundary dataset against uploaded rows on the
//! normalized country name. Exact matches only.

use crate::data::UploadTable;
use crate::geo::{BoundaryRecord, Geometry};
use serde::Serialize;
use std::collections::HashMap;

/// A boundary with the metrics of its matching upload row, if any
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinedRecord {
    /// Normalized country name
    pub name: String,
    pub geometry: Geometry,
    /// `None` when no uploaded row matched
    pub metrics: Option<Vec<Option<f64>>>,
}

impl JoinedRecord {
    /// True when the first metric column has a value for this country.
    /// A present zero counts as data.
    pub fn has_data(&self) -> bool {
        self.metric(0).is_some()
    }

    pub fn metric(&self, idx: usize) -> Option<f64> {
        self.metrics.as_ref()?.get(idx).copied().flatten()
    }
}

/// Join every boundary to the first uploaded row sharing its key.
///
/// Boundaries without geometry are dropped; boundaries without a match are
/// kept with `metrics: None`. Output order follows the boundary dataset.
pub fn left_join(boundaries: Vec<BoundaryRecord>, upload: &UploadTable) -> Vec<JoinedRecord> {
    let mut by_key: HashMap<&str, &[Option<f64>]> = HashMap::new();
    for record in &upload.records {
        if record.key.is_empty() {
            continue;
        }
        by_key
            .entry(record.key.as_str())
            .or_insert(record.metrics.as_slice());
    }

    let mut dropped = 0;
    let joined: Vec<JoinedRecord> = boundaries
        .into_iter()
        .filter_map(|boundary| {
            let Some(geometry) = boundary.geometry else {
                dropped += 1;
                return None;
            };
            let metrics = by_key.get(boundary.key.as_str()).map(|m| m.to_vec());
            Some(JoinedRecord {
                name: boundary.key,
                geometry,
                metrics,
            })
        })
        .collect();

    let matched = joined.iter().filter(|r| r.metrics.is_some()).count();
    tracing::info!(
        boundaries = joined.len(),
        matched,
        dropped_without_geometry = dropped,
        "Joined upload to boundaries"
    );

    joined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::UploadRecord;

    fn square() -> Geometry {
        Geometry::Polygon(vec![vec![
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 1.0],
            [0.0, 1.0],
            [0.0, 0.0],
        ]])
    }

    fn upload(rows: &[(&str, Vec<Option<f64>>)]) -> UploadTable {
        UploadTable {
            metric_columns: vec!["a".to_string(), "b".to_string()],
            records: rows
                .iter()
                .map(|(c, m)| UploadRecord::new(*c, m.clone()))
                .collect(),
        }
    }

    #[test]
    fn test_left_join_keeps_unmatched() {
        let boundaries = vec![
            BoundaryRecord::new("India", Some(square())),
            BoundaryRecord::new("Atlantis", Some(square())),
        ];
        let table = upload(&[("india ", vec![Some(10.0), Some(4.0)])]);

        let joined = left_join(boundaries, &table);

        assert_eq!(joined.len(), 2);
        assert_eq!(joined[0].name, "India");
        assert_eq!(joined[0].metrics, Some(vec![Some(10.0), Some(4.0)]));
        assert!(joined[0].has_data());
        assert_eq!(joined[1].name, "Atlantis");
        assert_eq!(joined[1].metrics, None);
        assert!(!joined[1].has_data());
    }

    #[test]
    fn test_missing_geometry_dropped() {
        let boundaries = vec![
            BoundaryRecord::new("India", None),
            BoundaryRecord::new("Nepal", Some(square())),
        ];
        let table = upload(&[("India", vec![Some(1.0), None])]);

        let joined = left_join(boundaries, &table);

        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].name, "Nepal");
    }

    #[test]
    fn test_each_boundary_at_most_once() {
        let boundaries = vec![BoundaryRecord::new("Kenya", Some(square()))];
        let table = upload(&[
            ("Kenya", vec![Some(1.0), None]),
            ("KENYA", vec![Some(2.0), None]),
        ]);

        let joined = left_join(boundaries, &table);

        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].metric(0), Some(1.0));
    }

    #[test]
    fn test_no_alias_matching() {
        let boundaries = vec![BoundaryRecord::new("United States of America", Some(square()))];
        let table = upload(&[("USA", vec![Some(1.0), Some(1.0)])]);

        let joined = left_join(boundaries, &table);
        assert!(joined[0].metrics.is_none());
    }

    #[test]
    fn test_zero_counts_as_data_but_empty_does_not() {
        let boundaries = vec![
            BoundaryRecord::new("Rwanda", Some(square())),
            BoundaryRecord::new("Uganda", Some(square())),
        ];
        let table = upload(&[
            ("Rwanda", vec![Some(0.0), Some(2.0)]),
            ("Uganda", vec![None, Some(5.0)]),
        ]);

        let joined = left_join(boundaries, &table);

        assert!(joined[0].has_data());
        assert!(!joined[1].has_data());
        assert!(joined[1].metrics.is_some());
    }

    #[test]
    fn test_blank_names_never_match() {
        let boundaries = vec![BoundaryRecord::new("", Some(square()))];
        let table = upload(&[("  ", vec![Some(1.0), None])]);

        let joined = left_join(boundaries, &table);
        assert!(joined[0].metrics.is_none());
    }
}
