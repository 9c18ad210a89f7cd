use crate::map::ReadOnlyMap;
use crate::models::area::{Area, AreaResponse};
use crate::models::{Property, PropertyValue};
use crate::utils::coordinates::{decode_view_state, DecodedViewState, ViewState, WireCoordinates};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LandOwner {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LandRegion {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandResponse {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub area: f64,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub area_count: u32,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub coordinate: Option<WireCoordinates>,
    #[serde(default)]
    pub areas: Vec<AreaResponse>,
    #[serde(default)]
    pub planning_map_url: Option<String>,
    #[serde(default)]
    pub google_map_url: Option<String>,
    #[serde(default)]
    pub owner: LandOwner,
    #[serde(default)]
    pub region: LandRegion,
    #[serde(default, rename = "created_date")]
    pub created_date: Option<String>,
    #[serde(default, rename = "modified_date")]
    pub modified_date: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Land {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub area: f64,
    pub price: f64,
    pub location: String,
    pub area_count: u32,
    pub properties: Vec<Property>,
    pub coordinate: DecodedViewState,
    pub areas: Vec<Area>,
    pub planning_map_url: Option<String>,
    pub google_map_url: Option<String>,
    pub owner: LandOwner,
    pub region: LandRegion,
    pub created_date: Option<String>,
    pub modified_date: Option<String>,
}

impl From<LandResponse> for Land {
    fn from(value: LandResponse) -> Self {
        let coordinate = match &value.coordinate {
            Some(wire) => decode_view_state(wire),
            None => {
                tracing::warn!(land = value.id, "land has no coordinates, using default");
                DecodedViewState::defaulted()
            }
        };

        Self {
            id: value.id,
            name: value.name,
            address: value.address,
            area: value.area,
            price: value.price,
            location: value.location,
            area_count: value.area_count,
            properties: value.properties,
            coordinate,
            areas: value.areas.into_iter().map(Area::from).collect(),
            planning_map_url: value.planning_map_url,
            google_map_url: value.google_map_url,
            owner: value.owner,
            region: value.region,
            created_date: value.created_date,
            modified_date: value.modified_date,
        }
    }
}

impl Land {
    pub fn view_state(&self) -> ViewState {
        self.coordinate.view_state()
    }

    /// The land boundary with its areas laid over it.
    pub fn map(&self) -> ReadOnlyMap {
        ReadOnlyMap::new(
            self.view_state(),
            self.areas.iter().map(Area::overlay).collect(),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLand {
    pub name: String,
    pub address: String,
    pub area: f64,
    pub price: f64,
    pub location: String,
    pub area_count: u32,
    pub properties: Vec<Property>,
    pub coordinate: WireCoordinates,
    pub planning_map_url: String,
    pub google_map_url: String,
    pub owner: LandOwner,
    pub region: LandRegion,
}

impl CreateLand {
    /// Attributes every new land starts with.
    pub fn default_properties() -> Vec<Property> {
        vec![
            Property {
                key: "Frontage".to_string(),
                value: PropertyValue::Text("0m".to_string()),
            },
            Property {
                key: "Length".to_string(),
                value: PropertyValue::Number(0.0),
            },
            Property {
                key: "Direction".to_string(),
                value: PropertyValue::Text("Undetermined".to_string()),
            },
            Property {
                key: "Land title".to_string(),
                value: PropertyValue::Flag(false),
            },
        ]
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLand {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<Property>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<WireCoordinates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<LandOwner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<LandRegion>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Camera;
    use crate::utils::coordinates::Point;

    const LAND: &str = r#"{
        "id": 9,
        "name": "Riverside",
        "address": "12 Bank St",
        "area": 5000,
        "price": 1200000,
        "location": "East",
        "areaCount": 2,
        "coordinate": {"polygon": "[[0,0],[0,4],[4,4],[4,0]]", "center": "{\"lat\":2,\"lng\":2}", "zoom": 16},
        "areas": [
            {"id": 1, "name": "A", "status": "available", "coordinates": {"polygon": "[[1,1],[1,2],[2,2]]", "center": "{\"lat\":1.5,\"lng\":1.5}", "zoom": 17}},
            {"id": 2, "name": "B", "status": "pending", "coordinates": {"polygon": "oops", "center": "{\"lat\":3,\"lng\":3}", "zoom": 17}}
        ],
        "owner": {"id": 3},
        "region": {"id": 5, "name": "Delta"}
    }"#;

    #[test]
    fn test_land_from_response() {
        let land = Land::from(serde_json::from_str::<LandResponse>(LAND).unwrap());
        assert!(land.coordinate.is_fully_parsed());
        assert_eq!(land.view_state().center, Point::new(2.0, 2.0));
        assert_eq!(land.owner.name, "");
        assert!(land.properties.is_empty());
        assert_eq!(land.areas.len(), 2);
        assert!(land.areas[1].coordinates.polygon.is_defaulted());
        assert!(!land.areas[1].coordinates.center.is_defaulted());
    }

    #[test]
    fn test_land_map_overlays_areas() {
        let land = Land::from(serde_json::from_str::<LandResponse>(LAND).unwrap());
        let map = land.map();
        assert_eq!(map.overlays().len(), 2);
        assert_eq!(map.overlays()[0].status, "available");
        assert!(matches!(map.camera(), Camera::FitBounds { .. }));
    }

    #[test]
    fn test_create_payload_shape() {
        let payload = CreateLand {
            name: "Riverside".to_string(),
            address: "12 Bank St".to_string(),
            area: 5000.0,
            price: 1.0,
            location: "East".to_string(),
            area_count: 0,
            properties: CreateLand::default_properties(),
            coordinate: WireCoordinates {
                polygon: "[[1.0,2.0]]".into(),
                center: "{\"lat\":1.0,\"lng\":2.0}".into(),
                zoom: 15,
            },
            planning_map_url: String::new(),
            google_map_url: String::new(),
            owner: LandOwner {
                id: 3,
                ..LandOwner::default()
            },
            region: LandRegion {
                id: 5,
                name: "Delta".to_string(),
            },
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["areaCount"], 0);
        assert_eq!(json["coordinate"]["polygon"], "[[1.0,2.0]]");
        assert_eq!(json["properties"][3]["value"], false);
    }
}
