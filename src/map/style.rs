//! Map styling
//!
//! Category colors for metric columns and the choropleth fill rule.

use super::error::{FlowError, FlowResult};
use super::join::JoinedRecord;
use serde::Serialize;

/// Category colors, assigned to metric columns in upload order
pub const PALETTE: [&str; 6] = [
    "seagreen",
    "royalblue",
    "orange",
    "pink",
    "lime",
    "darkblue",
];

/// Fill for countries with a value in the first metric column
pub const DATA_FILL: &str = "red";

/// Fill for every other country
pub const NO_DATA_FILL: &str = "grey";

/// Metric column → color assignment
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    entries: Vec<(String, &'static str)>,
}

impl ColorMap {
    /// Assign palette colors by position. Fails when there are no metric
    /// columns or more columns than palette entries.
    pub fn new(metric_columns: &[String]) -> FlowResult<Self> {
        if metric_columns.is_empty() {
            return Err(FlowError::NoMetricColumns);
        }
        if metric_columns.len() > PALETTE.len() {
            return Err(FlowError::PaletteOverflow {
                columns: metric_columns.len(),
                palette: PALETTE.len(),
            });
        }

        Ok(Self {
            entries: metric_columns
                .iter()
                .cloned()
                .zip(PALETTE.iter().copied())
                .collect(),
        })
    }

    /// Color of the metric column at `idx`
    pub fn color(&self, idx: usize) -> Option<&'static str> {
        self.entries.get(idx).map(|(_, color)| *color)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &'static str)> {
        self.entries.iter().map(|(name, color)| (name.as_str(), *color))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Leaflet path style of one country
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStyle {
    pub fill_color: &'static str,
    pub color: &'static str,
    pub weight: u32,
    pub fill_opacity: f64,
}

/// Style a country by presence of its first metric.
pub fn feature_style(record: &JoinedRecord) -> FeatureStyle {
    FeatureStyle {
        fill_color: if record.has_data() {
            DATA_FILL
        } else {
            NO_DATA_FILL
        },
        color: "white",
        weight: 1,
        fill_opacity: 0.7,
    }
}
