//! Map Renderer Flow
//!
//! Turns one upload into a map, start to finish:
//!
//! 1. parse the upload ([`crate::data`])
//! 2. fetch the boundary dataset ([`crate::geo::BoundarySource`])
//! 3. left-join on normalized country name ([`join`])
//! 4. color countries and metric categories ([`style`])
//! 5. draw a stacked-bar thumbnail per country with data ([`chart`])
//! 6. assemble the [`MapView`] and the HTML page ([`view`], [`html`])
//!
//! [`MapRenderer::render`] is a pure function of the upload and the
//! boundaries; two calls on the same input produce the same view.
//!
//! ```rust,no_run
//! use healthmap::config::MapConfig;
//! use healthmap::data::UploadTable;
//! use healthmap::geo::StaticBoundarySource;
//! use healthmap::map::{html, MapRenderer};
//!
//! # async fn demo(geojson: String) -> Result<(), Box<dyn std::error::Error>> {
//! let upload = UploadTable::parse(b"country,Cardiovascular\nIndia,10\n")?;
//! let renderer = MapRenderer::new(MapConfig::default());
//! let view = renderer.run(&upload, &StaticBoundarySource::new(geojson)).await?;
//! let _page = html::map_page(&view)?;
//! # Ok(())
//! # }
//! ```

pub mod chart;
mod error;
pub mod html;
pub mod join;
pub mod style;
pub mod view;

pub use error::{FlowError, FlowResult};
pub use join::{left_join, JoinedRecord};
pub use style::{feature_style, ColorMap, FeatureStyle, PALETTE};
pub use view::{
    DivIcon, FeatureCollectionView, FeatureProperties, FeatureView, JoinSummary, LegendView,
    MapView, MarkerView, TileLayer,
};

use crate::config::MapConfig;
use crate::data::UploadTable;
use crate::geo::{BoundaryRecord, BoundarySource};

/// Builds map views from uploads
#[derive(Debug, Clone)]
pub struct MapRenderer {
    config: MapConfig,
}

impl MapRenderer {
    pub fn new(config: MapConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Fetch the boundaries from `source` and render `upload` onto them.
    pub async fn run(
        &self,
        upload: &UploadTable,
        source: &dyn BoundarySource,
    ) -> FlowResult<MapView> {
        let boundaries = source.fetch().await.map_err(|e| {
            tracing::warn!(source = %source.describe(), error = %e, "Boundary fetch failed");
            e
        })?;
        tracing::info!(
            source = %source.describe(),
            features = boundaries.len(),
            "Fetched boundary dataset"
        );

        self.render(upload, boundaries)
    }

    /// Join, style and assemble the view.
    pub fn render(
        &self,
        upload: &UploadTable,
        boundaries: Vec<BoundaryRecord>,
    ) -> FlowResult<MapView> {
        let colors = ColorMap::new(&upload.metric_columns)?;
        let joined = left_join(boundaries, upload);

        let mut features = Vec::with_capacity(joined.len());
        let mut markers = Vec::new();
        let mut summary = JoinSummary {
            countries: joined.len(),
            matched: 0,
            with_data: 0,
            markers: 0,
        };

        for record in joined {
            if record.metrics.is_some() {
                summary.matched += 1;
            }

            if record.has_data() {
                summary.with_data += 1;
                if let Some(marker) = thumbnail_marker(&record, &colors) {
                    markers.push(marker);
                }
            }

            features.push(FeatureView {
                kind: "Feature",
                properties: FeatureProperties {
                    name: record.name.clone(),
                    style: feature_style(&record),
                },
                geometry: record.geometry,
            });
        }
        summary.markers = markers.len();

        tracing::info!(
            countries = summary.countries,
            matched = summary.matched,
            markers = summary.markers,
            "Rendered map view"
        );

        Ok(MapView {
            center: [self.config.center_lat, self.config.center_lon],
            zoom: self.config.zoom,
            width: self.config.width,
            height: self.config.height,
            tiles: TileLayer::from_name(&self.config.tiles),
            features: FeatureCollectionView::new(features),
            markers,
            legend: LegendView::new(chart::svg_data_uri(&chart::legend_svg(&colors))),
            upload: upload.clone(),
            summary,
        })
    }
}

/// Thumbnail marker at the country centroid, skipped for empty or invalid
/// geometry.
fn thumbnail_marker(record: &JoinedRecord, colors: &ColorMap) -> Option<MarkerView> {
    let geometry = &record.geometry;
    let centroid = if geometry.is_valid() && !geometry.is_empty() {
        geometry.centroid()
    } else {
        None
    };

    let Some([lon, lat]) = centroid else {
        tracing::debug!(country = %record.name, "Skipping marker for unusable geometry");
        return None;
    };

    let values = record.metrics.as_deref().unwrap_or_default();
    let image = chart::svg_data_uri(&chart::stacked_bar_svg(values, colors));

    Some(MarkerView {
        name: record.name.clone(),
        location: [lat, lon],
        icon: DivIcon::image(&image),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::UploadRecord;
    use crate::geo::{BoundaryError, BoundaryResult, Geometry, StaticBoundarySource};
    use async_trait::async_trait;

    fn square(x0: f64, y0: f64) -> Geometry {
        Geometry::Polygon(vec![vec![
            [x0, y0],
            [x0 + 2.0, y0],
            [x0 + 2.0, y0 + 2.0],
            [x0, y0 + 2.0],
            [x0, y0],
        ]])
    }

    fn sample_upload() -> UploadTable {
        UploadTable::parse(
            b"country,Cardiovascular,Child Health,Respiratory,Maternal Health,Neonatal Health,Other
India,10,4,3,0,0,0
",
        )
        .unwrap()
    }

    fn boundaries() -> Vec<BoundaryRecord> {
        vec![
            BoundaryRecord::new("India", Some(square(78.0, 20.0))),
            BoundaryRecord::new("Atlantis", Some(square(-30.0, 30.0))),
            BoundaryRecord::new("Lemuria", None),
        ]
    }

    fn style_of<'a>(view: &'a MapView, name: &str) -> &'a FeatureStyle {
        &view
            .features
            .features
            .iter()
            .find(|f| f.properties.name == name)
            .unwrap()
            .properties
            .style
    }

    #[test]
    fn test_india_red_atlantis_grey() {
        let renderer = MapRenderer::new(MapConfig::default());
        let view = renderer.render(&sample_upload(), boundaries()).unwrap();

        assert_eq!(view.features.features.len(), 2);
        assert_eq!(style_of(&view, "India").fill_color, "red");
        assert_eq!(style_of(&view, "Atlantis").fill_color, "grey");

        assert_eq!(view.markers.len(), 1);
        assert_eq!(view.markers[0].name, "India");
        assert_eq!(view.markers[0].location, [21.0, 79.0]);
        assert!(view.markers[0]
            .icon
            .html
            .contains("data:image/svg+xml;base64,"));

        assert_eq!(
            view.summary,
            JoinSummary {
                countries: 2,
                matched: 1,
                with_data: 1,
                markers: 1
            }
        );
    }

    #[test]
    fn test_view_frame_from_config() {
        let renderer = MapRenderer::new(MapConfig::default());
        let view = renderer.render(&sample_upload(), boundaries()).unwrap();

        assert_eq!(view.center, [25.0, 80.0]);
        assert_eq!(view.zoom, 4);
        assert_eq!((view.width, view.height), (1024, 800));
        assert_eq!(view.legend.width, 250);
        assert!(view.legend.image.starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let renderer = MapRenderer::new(MapConfig::default());
        let first = renderer.render(&sample_upload(), boundaries()).unwrap();
        let second = renderer.render(&sample_upload(), boundaries()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_matches_renders_all_grey() {
        let upload = UploadTable {
            metric_columns: vec!["x".to_string()],
            records: vec![UploadRecord::new("Nowhere", vec![Some(1.0)])],
        };

        let renderer = MapRenderer::new(MapConfig::default());
        let view = renderer.render(&upload, boundaries()).unwrap();

        assert!(view
            .features
            .features
            .iter()
            .all(|f| f.properties.style.fill_color == "grey"));
        assert!(view.markers.is_empty());
    }

    #[test]
    fn test_invalid_geometry_gets_no_marker() {
        let flat = Geometry::Polygon(vec![vec![[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [0.0, 0.0]]]);
        let upload = UploadTable {
            metric_columns: vec!["x".to_string()],
            records: vec![UploadRecord::new("Flatland", vec![Some(1.0)])],
        };

        let renderer = MapRenderer::new(MapConfig::default());
        let view = renderer
            .render(&upload, vec![BoundaryRecord::new("Flatland", Some(flat))])
            .unwrap();

        assert_eq!(style_of(&view, "Flatland").fill_color, "red");
        assert!(view.markers.is_empty());
    }

    #[test]
    fn test_palette_overflow_fails() {
        let upload = UploadTable::parse(b"country,a,b,c,d,e,f,g\nIndia,1,1,1,1,1,1,1\n").unwrap();

        let renderer = MapRenderer::new(MapConfig::default());
        let err = renderer.render(&upload, boundaries()).unwrap_err();
        assert!(matches!(
            err,
            FlowError::PaletteOverflow {
                columns: 7,
                palette: 6
            }
        ));
    }

    struct FailingSource;

    #[async_trait]
    impl BoundarySource for FailingSource {
        fn describe(&self) -> String {
            "failing".to_string()
        }

        async fn fetch(&self) -> BoundaryResult<Vec<BoundaryRecord>> {
            Err(BoundaryError::Status {
                status: 503,
                url: "https://example.com".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_run_surfaces_fetch_failure() {
        let renderer = MapRenderer::new(MapConfig::default());
        let err = renderer
            .run(&sample_upload(), &FailingSource)
            .await
            .unwrap_err();
        assert!(matches!(err, FlowError::Boundaries(_)));
    }

    #[tokio::test]
    async fn test_run_with_static_source() {
        let geojson = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {"name": "INDIA"},
             "geometry": {"type": "Polygon", "coordinates": [[[78, 20], [80, 20], [80, 22], [78, 22], [78, 20]]]}}
        ]}"#;

        let renderer = MapRenderer::new(MapConfig::default());
        let view = renderer
            .run(&sample_upload(), &StaticBoundarySource::new(geojson))
            .await
            .unwrap();

        assert_eq!(style_of(&view, "India").fill_color, "red");
        assert_eq!(view.markers.len(), 1);
    }
}
