use crate::map::PathStyle;
use crate::utils::coordinates::{Point, Polygon};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    #[serde(rename = "Point")]
    Point { coordinates: [f64; 2] },
    #[serde(rename = "Polygon")]
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
}

#[derive(Clone, Debug, Serialize)]
pub struct GeoJsonFeatureCollection {
    #[serde(rename = "type")]
    pub type_field: String,
    pub features: Vec<GeoJsonFeature>,
}

#[derive(Clone, Debug, Serialize)]
pub struct GeoJsonFeature {
    #[serde(rename = "type")]
    pub type_field: String,
    pub geometry: GeoJsonGeometry,
    pub properties: GeoJsonProperties,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureRole {
    Primary,
    Overlay,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoJsonProperties {
    pub id: Option<i64>,
    pub role: FeatureRole,
    pub name: Option<String>,
    pub status: Option<String>,
    pub tooltip: String,
    pub tooltip_permanent: bool,
    pub style: PathStyle,
    pub hover_style: Option<PathStyle>,
}

impl GeoJsonFeatureCollection {
    pub fn new() -> Self {
        Self {
            type_field: "FeatureCollection".to_string(),
            features: Vec::new(),
        }
    }
}

impl Default for GeoJsonFeatureCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl GeoJsonFeature {
    pub fn new(geometry: GeoJsonGeometry, properties: GeoJsonProperties) -> Self {
        Self {
            type_field: "Feature".to_string(),
            geometry,
            properties,
        }
    }
}

/// GeoJSON positions are longitude first.
pub fn lng_lat(point: &Point) -> [f64; 2] {
    [point.lng, point.lat]
}

impl From<&Polygon> for GeoJsonGeometry {
    fn from(polygon: &Polygon) -> Self {
        // a one-vertex "polygon" is only a point
        if let [single] = polygon.points.as_slice() {
            return GeoJsonGeometry::Point {
                coordinates: lng_lat(single),
            };
        }

        let mut ring: Vec<[f64; 2]> = polygon.points.iter().map(lng_lat).collect();
        if let (Some(first), Some(last)) = (ring.first().copied(), ring.last().copied()) {
            if first != last {
                ring.push(first);
            }
        }
        GeoJsonGeometry::Polygon {
            coordinates: vec![ring],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_is_closed_and_swapped() {
        let polygon = Polygon::from(vec![[1.0, 10.0], [2.0, 20.0], [3.0, 10.0]]);
        let geometry = GeoJsonGeometry::from(&polygon);
        assert_eq!(
            geometry,
            GeoJsonGeometry::Polygon {
                coordinates: vec![vec![[10.0, 1.0], [20.0, 2.0], [10.0, 3.0], [10.0, 1.0]]]
            }
        );
    }

    #[test]
    fn test_single_vertex_is_point() {
        let polygon = Polygon::from(vec![[21.0, 105.0]]);
        assert_eq!(
            GeoJsonGeometry::from(&polygon),
            GeoJsonGeometry::Point {
                coordinates: [105.0, 21.0]
            }
        );
    }

    #[test]
    fn test_serialised_type_tags() {
        let collection = GeoJsonFeatureCollection::new();
        let json = serde_json::to_value(&collection).unwrap();
        assert_eq!(json["type"], "FeatureCollection");

        let geometry = GeoJsonGeometry::Point {
            coordinates: [1.0, 2.0],
        };
        assert_eq!(serde_json::to_value(&geometry).unwrap()["type"], "Point");
    }
}
