//! HTML pages
//!
//! The single dashboard page in its three states: waiting for an upload,
//! showing a rendered map, and showing the boundary fetch error.

use super::error::FlowResult;
use super::view::MapView;
use crate::data::upload::format_metric;
use crate::data::{UploadTable, COUNTRY_COLUMN, SAMPLE_FILE_NAME};
use std::fmt::Write as _;

/// Page title
pub const TITLE: &str = "Interactive Map with Health Data";

const LEAFLET_HEAD: &str = r#"  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" crossorigin="" />
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js" crossorigin=""></script>
"#;

const STYLE: &str = r#"  <style>
    body { font-family: sans-serif; margin: 0 auto; max-width: 1200px; padding: 1rem 2rem; color: #262730; }
    h1 { font-size: 2rem; }
    hr { border: none; border-top: 1px solid #e6e6e6; margin: 1.5rem 0; }
    .button { display: inline-block; padding: 0.4rem 0.9rem; border: 1px solid #ccc; border-radius: 0.4rem; color: inherit; text-decoration: none; background: #fff; }
    .info { background: #e8f0fe; color: #0b4d9a; padding: 0.8rem 1rem; border-radius: 0.4rem; }
    .error { background: #fdecea; color: #8a1c12; padding: 0.8rem 1rem; border-radius: 0.4rem; }
    table.data { border-collapse: collapse; font-size: 0.9rem; }
    table.data th, table.data td { border: 1px solid #e6e6e6; padding: 0.25rem 0.6rem; text-align: right; }
    table.data th:first-child, table.data td:first-child { text-align: left; }
    .summary { color: #6b6b6b; font-size: 0.9rem; }
  </style>
"#;

// `__VIEW__` is replaced with the serialized MapView.
const MAP_SCRIPT: &str = r#"  <script>
    (function () {
      const view = __VIEW__;
      const text = (s) => { const span = document.createElement('span'); span.textContent = s; return span; };

      const map = L.map('map').setView(view.center, view.zoom);
      L.tileLayer(view.tiles.url, {
        attribution: view.tiles.attribution,
        subdomains: view.tiles.subdomains,
        maxZoom: view.tiles.max_zoom
      }).addTo(map);

      L.geoJSON(view.features, {
        style: (feature) => feature.properties.style,
        onEachFeature: (feature, layer) => layer.bindTooltip(text(feature.properties.name))
      }).addTo(map);

      for (const marker of view.markers) {
        const icon = L.divIcon({
          html: marker.icon.html,
          iconSize: marker.icon.size,
          iconAnchor: marker.icon.anchor,
          className: ''
        });
        L.marker(marker.location, { icon: icon }).bindTooltip(text(marker.name)).addTo(map);
      }
    })();
  </script>
"#;

/// Escape text for HTML/XML element content and attribute values.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Landing page before any upload
pub fn landing_page() -> String {
    let mut body = String::new();
    body.push_str("  <div class=\"info\">Please upload a CSV file to begin.</div>\n");
    layout(&body, false)
}

/// Page shown when the boundary dataset could not be loaded. The uploaded
/// table is still shown; no map is drawn.
pub fn fetch_error_page(upload: &UploadTable, message: &str) -> String {
    let mut body = String::new();
    body.push_str("  <p>Uploaded Data:</p>\n");
    body.push_str(&data_table(upload));
    let _ = writeln!(
        body,
        "  <div class=\"error\">Error loading GeoJSON data: {}</div>",
        escape_markup(message)
    );
    layout(&body, false)
}

/// Page with the uploaded table, the interactive map and the legend.
pub fn map_page(view: &MapView) -> FlowResult<String> {
    let mut body = String::new();

    body.push_str("  <p>Uploaded Data:</p>\n");
    body.push_str(&data_table(&view.upload));
    body.push_str("  <h3>Interactive Map</h3>\n");
    let _ = writeln!(
        body,
        "  <p class=\"summary\">{} of {} countries matched, {} with data.</p>",
        view.summary.matched, view.summary.countries, view.summary.with_data
    );
    let _ = writeln!(
        body,
        "  <div id=\"map\" style=\"width: {}px; height: {}px;\"></div>",
        view.width, view.height
    );
    let _ = writeln!(
        body,
        "  <div style=\"position: fixed; bottom: {}px; right: {}px; z-index: 9999;\">\n    <img src=\"{}\" alt=\"Legend\" style=\"width: {}px; border: 1px solid #ccc; background-color: #fff; padding: 5px;\">\n  </div>",
        view.legend.bottom,
        view.legend.right,
        escape_markup(&view.legend.image),
        view.legend.width
    );

    body.push_str(&MAP_SCRIPT.replace("__VIEW__", &script_json(view)?));

    Ok(layout(&body, true))
}

/// JSON safe to place inside a `<script>` element.
fn script_json<T: serde::Serialize>(value: &T) -> FlowResult<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

fn data_table(upload: &UploadTable) -> String {
    let mut html = String::from("  <table class=\"data\">\n    <tr>");
    let _ = write!(html, "<th>{}</th>", COUNTRY_COLUMN);
    for column in &upload.metric_columns {
        let _ = write!(html, "<th>{}</th>", escape_markup(column));
    }
    html.push_str("</tr>\n");

    for record in &upload.records {
        let _ = write!(html, "    <tr><td>{}</td>", escape_markup(&record.country));
        for value in &record.metrics {
            let _ = write!(html, "<td>{}</td>", format_metric(*value));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("  </table>\n");
    html
}

fn layout(body: &str, with_map: bool) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\" />\n");
    let _ = writeln!(html, "  <title>{}</title>", TITLE);
    if with_map {
        html.push_str(LEAFLET_HEAD);
    }
    html.push_str(STYLE);
    html.push_str("</head>\n<body>\n");

    let _ = writeln!(html, "  <h1>🗺️ {}</h1>", TITLE);
    html.push_str(
        "  <p>Upload your country data (CSV) to visualize health metrics on an interactive map.</p>\n  <hr />\n",
    );
    let _ = writeln!(
        html,
        "  <a class=\"button\" href=\"/sample.csv\" download=\"{}\">Download Sample Data CSV</a>\n  <hr />",
        SAMPLE_FILE_NAME
    );
    html.push_str(
        r#"  <form action="/render" method="post" enctype="multipart/form-data">
    <label for="file">Upload your data file (CSV format)</label>
    <input id="file" name="file" type="file" accept=".csv,text/csv" required />
    <button class="button" type="submit">Render map</button>
  </form>
"#,
    );

    html.push_str(body);
    html.push_str("</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfig;
    use crate::data::UploadRecord;
    use crate::geo::{BoundaryRecord, Geometry};
    use crate::map::MapRenderer;

    fn view() -> MapView {
        let upload = UploadTable {
            metric_columns: vec!["Cardio".to_string(), "Other".to_string()],
            records: vec![
                UploadRecord::new("India", vec![Some(10.0), Some(1.0)]),
                UploadRecord::new("<b>Nepal</b>", vec![None, Some(2.5)]),
            ],
        };
        let square = Geometry::Polygon(vec![vec![
            [78.0, 20.0],
            [80.0, 20.0],
            [80.0, 22.0],
            [78.0, 22.0],
            [78.0, 20.0],
        ]]);

        MapRenderer::new(MapConfig::default())
            .render(
                &upload,
                vec![
                    BoundaryRecord::new("India", Some(square.clone())),
                    BoundaryRecord::new("Oz</script><script>alert(1)", Some(square)),
                ],
            )
            .unwrap()
    }

    #[test]
    fn test_escape_markup() {
        assert_eq!(
            escape_markup(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_landing_page() {
        let html = landing_page();
        assert!(html.contains("Please upload a CSV file to begin."));
        assert!(html.contains("href=\"/sample.csv\""));
        assert!(html.contains("enctype=\"multipart/form-data\""));
        assert!(!html.contains("leaflet.js"));
    }

    #[test]
    fn test_map_page_contents() {
        let html = map_page(&view()).unwrap();

        assert!(html.contains("leaflet.js"));
        assert!(html.contains("<div id=\"map\" style=\"width: 1024px; height: 800px;\"></div>"));
        assert!(html.contains("position: fixed; bottom: 10px; right: 10px; z-index: 9999;"));
        assert!(html.contains("alt=\"Legend\" style=\"width: 250px;"));
        assert!(html.contains("<th>country</th><th>Cardio</th><th>Other</th>"));
        assert!(html.contains("<tr><td>India</td><td>10</td><td>1</td></tr>"));
        assert!(html.contains("<td>&lt;b&gt;Nepal&lt;/b&gt;</td><td></td><td>2.5</td>"));
        assert!(!html.contains("__VIEW__"));
    }

    #[test]
    fn test_script_cannot_be_closed_by_data() {
        let html = map_page(&view()).unwrap();
        assert_eq!(html.matches("</script>").count(), 2);
    }

    #[test]
    fn test_fetch_error_page() {
        let upload = UploadTable {
            metric_columns: vec!["x".to_string()],
            records: vec![UploadRecord::new("India", vec![Some(1.0)])],
        };
        let html = fetch_error_page(&upload, "Request failed: <timeout>");

        assert!(html.contains("Error loading GeoJSON data: Request failed: &lt;timeout&gt;"));
        assert!(html.contains("<td>India</td>"));
        assert!(!html.contains("id=\"map\""));
    }
}
