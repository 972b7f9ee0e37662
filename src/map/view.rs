//! Map view description
//!
//! Everything the page needs to draw one upload: base tiles, the styled
//! country layer, thumbnail markers and the legend overlay. Serializable so
//! it can be embedded in the page or returned as JSON.

use super::style::FeatureStyle;
use crate::data::UploadTable;
use crate::geo::Geometry;
use serde::Serialize;

/// Rendered marker icon size in CSS pixels
pub const MARKER_ICON_SIZE: [u32; 2] = [60, 100];

/// Icon point placed on the centroid
pub const MARKER_ICON_ANCHOR: [u32; 2] = [30, 80];

/// Legend overlay width in CSS pixels
pub const LEGEND_WIDTH: u32 = 250;

/// Distance of the legend from the bottom-right page corner
pub const LEGEND_OFFSET: u32 = 10;

/// Base tile layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileLayer {
    pub url: String,
    pub attribution: String,
    pub subdomains: String,
    pub max_zoom: u8,
}

impl TileLayer {
    /// Resolve a tile preset by name. Anything containing `{z}` is used as
    /// a URL template; unknown names fall back to CartoDB Positron.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "openstreetmap" | "osm" => Self {
                url: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
                attribution: "&copy; OpenStreetMap contributors".to_string(),
                subdomains: "abc".to_string(),
                max_zoom: 19,
            },
            "cartodb positron" | "cartodbpositron" => Self::positron(),
            _ if name.contains("{z}") => Self {
                url: name.to_string(),
                attribution: String::new(),
                subdomains: "abc".to_string(),
                max_zoom: 18,
            },
            _ => {
                tracing::warn!(tiles = %name, "Unknown tile preset, using cartodb positron");
                Self::positron()
            }
        }
    }

    fn positron() -> Self {
        Self {
            url: "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png".to_string(),
            attribution: "&copy; OpenStreetMap contributors &copy; CARTO".to_string(),
            subdomains: "abcd".to_string(),
            max_zoom: 20,
        }
    }
}

/// Per-country properties read by the page script
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureProperties {
    pub name: String,
    pub style: FeatureStyle,
}

/// GeoJSON feature of the country layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureView {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub properties: FeatureProperties,
    pub geometry: Geometry,
}

/// GeoJSON FeatureCollection of the country layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCollectionView {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub features: Vec<FeatureView>,
}

impl FeatureCollectionView {
    pub fn new(features: Vec<FeatureView>) -> Self {
        Self {
            kind: "FeatureCollection",
            features,
        }
    }
}

/// HTML marker icon
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DivIcon {
    pub html: String,
    pub size: [u32; 2],
    pub anchor: [u32; 2],
}

impl DivIcon {
    /// Icon showing `image_uri` at the fixed marker size
    pub fn image(image_uri: &str) -> Self {
        Self {
            html: format!(
                r#"<img src="{}" style="width: {}px; height: {}px;">"#,
                image_uri, MARKER_ICON_SIZE[0], MARKER_ICON_SIZE[1]
            ),
            size: MARKER_ICON_SIZE,
            anchor: MARKER_ICON_ANCHOR,
        }
    }
}

/// Thumbnail marker at a country centroid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerView {
    pub name: String,
    /// `[lat, lon]`
    pub location: [f64; 2],
    pub icon: DivIcon,
}

/// Legend overlay fixed to the bottom-right page corner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendView {
    pub image: String,
    pub width: u32,
    pub bottom: u32,
    pub right: u32,
}

impl LegendView {
    pub fn new(image: String) -> Self {
        Self {
            image,
            width: LEGEND_WIDTH,
            bottom: LEGEND_OFFSET,
            right: LEGEND_OFFSET,
        }
    }
}

/// Join statistics shown alongside the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JoinSummary {
    /// Boundaries with geometry
    pub countries: usize,
    /// Boundaries matched to an uploaded row
    pub matched: usize,
    /// Countries drawn with data fill
    pub with_data: usize,
    /// Thumbnail markers placed
    pub markers: usize,
}

/// Complete description of one rendered upload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    /// `[lat, lon]`
    pub center: [f64; 2],
    pub zoom: u8,
    pub width: u32,
    pub height: u32,
    pub tiles: TileLayer,
    pub features: FeatureCollectionView,
    pub markers: Vec<MarkerView>,
    pub legend: LegendView,
    pub upload: UploadTable,
    pub summary: JoinSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_presets() {
        let positron = TileLayer::from_name("cartodb positron");
        assert!(positron.url.contains("basemaps.cartocdn.com/light_all"));
        assert_eq!(positron.subdomains, "abcd");

        let osm = TileLayer::from_name("OpenStreetMap");
        assert!(osm.url.starts_with("https://tile.openstreetmap.org"));

        let custom = TileLayer::from_name("https://tiles.example.com/{z}/{x}/{y}.png");
        assert_eq!(custom.url, "https://tiles.example.com/{z}/{x}/{y}.png");

        assert_eq!(TileLayer::from_name("nonsense"), positron);
    }

    #[test]
    fn test_div_icon() {
        let icon = DivIcon::image("data:image/svg+xml;base64,AAAA");
        assert_eq!(
            icon.html,
            r#"<img src="data:image/svg+xml;base64,AAAA" style="width: 60px; height: 100px;">"#
        );
        assert_eq!(icon.size, [60, 100]);
        assert_eq!(icon.anchor, [30, 80]);
    }

    #[test]
    fn test_feature_collection_serializes_as_geojson() {
        let collection = FeatureCollectionView::new(vec![]);
        let value = serde_json::to_value(&collection).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
        assert!(value["features"].as_array().unwrap().is_empty());
    }
}
