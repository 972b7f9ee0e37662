//! Country geometries
//!
//! Polygon and multipolygon outlines in GeoJSON `[lon, lat]` order, with the
//! few geometric queries the map needs: emptiness, a structural validity
//! check, and the area-weighted centroid used for marker placement.

use serde::Serialize;
use serde_json::Value;

/// `[longitude, latitude]`
pub type Position = [f64; 2];

/// Closed ring of positions
pub type Ring = Vec<Position>;

/// Country outline. Serializes as a GeoJSON geometry object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    /// Exterior ring followed by holes
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
}

impl Geometry {
    /// Read a GeoJSON geometry object. Returns `None` for null geometries,
    /// non-areal types, and malformed coordinates.
    pub fn from_geojson(value: &Value) -> Option<Self> {
        let ty = value.get("type")?.as_str()?;
        let coords = value.get("coordinates")?;

        match ty {
            "Polygon" => parse_polygon(coords).map(Geometry::Polygon),
            "MultiPolygon" => coords
                .as_array()?
                .iter()
                .map(parse_polygon)
                .collect::<Option<Vec<_>>>()
                .map(Geometry::MultiPolygon),
            _ => None,
        }
    }

    fn polygons(&self) -> Vec<&[Ring]> {
        match self {
            Geometry::Polygon(rings) => vec![rings.as_slice()],
            Geometry::MultiPolygon(polys) => polys.iter().map(|p| p.as_slice()).collect(),
        }
    }

    /// True when no polygon has any exterior vertex.
    pub fn is_empty(&self) -> bool {
        self.polygons()
            .iter()
            .all(|rings| rings.first().map_or(true, |ring| ring.is_empty()))
    }

    /// Structural validity: every ring closed with at least four finite
    /// positions, and every exterior ring enclosing a non-zero area.
    /// Self-intersections are not detected.
    pub fn is_valid(&self) -> bool {
        let polygons = self.polygons();
        if polygons.is_empty() {
            return false;
        }

        polygons.iter().all(|rings| {
            let Some(exterior) = rings.first() else {
                return false;
            };
            rings.iter().all(|ring| ring_is_well_formed(ring))
                && ring_moments(exterior).area2 != 0.0
        })
    }

    /// Area-weighted centroid as `[lon, lat]`, holes subtracted.
    /// `None` when the total area is zero.
    pub fn centroid(&self) -> Option<Position> {
        let mut total = Moments::default();

        for rings in self.polygons() {
            for (idx, ring) in rings.iter().enumerate() {
                let m = ring_moments(ring);
                // Exterior counts positive, holes negative, whatever the winding.
                let sign = match (idx == 0, m.area2 >= 0.0) {
                    (true, true) | (false, false) => 1.0,
                    _ => -1.0,
                };
                total.area2 += sign * m.area2;
                total.cx += sign * m.cx;
                total.cy += sign * m.cy;
            }
        }

        if total.area2 == 0.0 || !total.area2.is_finite() {
            return None;
        }

        let centroid = [total.cx / (3.0 * total.area2), total.cy / (3.0 * total.area2)];
        if centroid.iter().all(|c| c.is_finite()) {
            Some(centroid)
        } else {
            None
        }
    }
}

#[derive(Debug, Default)]
struct Moments {
    /// Twice the signed area
    area2: f64,
    cx: f64,
    cy: f64,
}

fn ring_moments(ring: &[Position]) -> Moments {
    let mut m = Moments::default();
    if ring.len() < 3 {
        return m;
    }

    for (i, a) in ring.iter().enumerate() {
        let b = ring[(i + 1) % ring.len()];
        let cross = a[0] * b[1] - b[0] * a[1];
        m.area2 += cross;
        m.cx += (a[0] + b[0]) * cross;
        m.cy += (a[1] + b[1]) * cross;
    }
    m
}

fn ring_is_well_formed(ring: &[Position]) -> bool {
    ring.len() >= 4
        && ring.first() == ring.last()
        && ring.iter().flatten().all(|c| c.is_finite())
}

fn parse_polygon(value: &Value) -> Option<Vec<Ring>> {
    value.as_array()?.iter().map(parse_ring).collect()
}

fn parse_ring(value: &Value) -> Option<Ring> {
    value
        .as_array()?
        .iter()
        .map(|pos| {
            let pos = pos.as_array()?;
            // Extra ordinates (altitude) are ignored.
            match (pos.first()?.as_f64(), pos.get(1)?.as_f64()) {
                (Some(lon), Some(lat)) => Some([lon, lat]),
                _ => None,
            }
        })
        .collect()
}
