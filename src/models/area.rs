use crate::map::Overlay;
use crate::models::NamedRef;
use crate::utils::coordinates::{decode_view_state, DecodedViewState, ViewState, WireCoordinates};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AreaStatus {
    Available,
    InUse,
    Pending,
}

impl AreaStatus {
    pub const ALL: [AreaStatus; 3] = [AreaStatus::Available, AreaStatus::InUse, AreaStatus::Pending];

    pub fn as_str(&self) -> &'static str {
        match self {
            AreaStatus::Available => "available",
            AreaStatus::InUse => "in-use",
            AreaStatus::Pending => "pending",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaClassification {
    #[default]
    Plant,
    #[serde(other)]
    Other,
}

impl AreaClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            AreaClassification::Plant => "plant",
            AreaClassification::Other => "other",
        }
    }
}

impl fmt::Display for AreaClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An area as the backend sends it; status stays a free string so unknown
/// values still render with the fallback colour.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaResponse {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub area_name: String,
    #[serde(default)]
    pub land_plot: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub area: f64,
    #[serde(default)]
    pub usage: String,
    #[serde(default)]
    pub coordinates: Option<WireCoordinates>,
    #[serde(default)]
    pub classification: AreaClassification,
    #[serde(default)]
    pub employees: Vec<NamedRef>,
    #[serde(default)]
    pub tasks: Vec<AreaTask>,
    #[serde(default)]
    pub land: Option<NamedRef>,
    #[serde(default, rename = "created_date")]
    pub created_date: Option<String>,
    #[serde(default, rename = "modified_date")]
    pub modified_date: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AreaTask {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Area {
    pub id: i64,
    pub name: String,
    pub area_name: String,
    pub land_plot: String,
    pub status: String,
    pub area: f64,
    pub usage: String,
    pub coordinates: DecodedViewState,
    pub classification: AreaClassification,
    pub employees: Vec<NamedRef>,
    pub tasks: Vec<AreaTask>,
    pub land: Option<NamedRef>,
    pub created_date: Option<String>,
    pub modified_date: Option<String>,
}

impl From<AreaResponse> for Area {
    fn from(value: AreaResponse) -> Self {
        let coordinates = match &value.coordinates {
            Some(wire) => decode_view_state(wire),
            None => {
                tracing::warn!(area = value.id, "area has no coordinates, using default");
                DecodedViewState::defaulted()
            }
        };

        Self {
            id: value.id,
            name: value.name,
            area_name: value.area_name,
            land_plot: value.land_plot,
            status: value.status,
            area: value.area,
            usage: value.usage,
            coordinates,
            classification: value.classification,
            employees: value.employees,
            tasks: value.tasks,
            land: value.land,
            created_date: value.created_date,
            modified_date: value.modified_date,
        }
    }
}

impl Area {
    pub fn view_state(&self) -> ViewState {
        self.coordinates.view_state()
    }

    pub fn tooltip(&self) -> String {
        format!(
            "Area: {}\nSize: {} m²\nUsage: {}\nStatus: {}\nClassification: {}",
            self.name, self.area, self.usage, self.status, self.classification
        )
    }

    pub fn overlay(&self) -> Overlay {
        Overlay {
            id: self.id,
            name: self.name.clone(),
            status: self.status.clone(),
            tooltip: self.tooltip(),
            polygon: self.coordinates.polygon.value().clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArea {
    pub name: String,
    pub area_name: String,
    pub land_plot: String,
    pub status: AreaStatus,
    pub area: f64,
    pub usage: String,
    pub land_id: i64,
    pub coordinates: WireCoordinates,
    pub classification: AreaClassification,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArea {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub land_plot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AreaStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<WireCoordinates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<AreaClassification>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::coordinates::{default_view_state, Point};

    #[test]
    fn test_area_from_response() {
        let response: AreaResponse = serde_json::from_str(
            r#"{
                "id": 4,
                "name": "North orchard",
                "status": "in-use",
                "area": 120.5,
                "usage": "Lychee",
                "classification": "plant",
                "coordinates": {"polygon": "[[10,20],[30,40]]", "center": "{\"lat\":15,\"lng\":25}", "zoom": 12}
            }"#,
        )
        .unwrap();
        let area = Area::from(response);
        assert!(area.coordinates.is_fully_parsed());
        assert_eq!(area.view_state().center, Point::new(15.0, 25.0));
        assert_eq!(area.overlay().polygon.len(), 2);
        assert!(area.tooltip().contains("Status: in-use"));
    }

    #[test]
    fn test_missing_coordinates_default() {
        let response: AreaResponse =
            serde_json::from_str(r#"{"id": 1, "classification": "greenhouse"}"#).unwrap();
        let area = Area::from(response);
        assert_eq!(area.classification, AreaClassification::Other);
        assert!(area.coordinates.polygon.is_defaulted());
        assert_eq!(area.view_state(), default_view_state());
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(AreaStatus::parse("in-use"), Some(AreaStatus::InUse));
        assert_eq!(AreaStatus::parse("busy"), None);
        assert_eq!(serde_json::to_string(&AreaStatus::InUse).unwrap(), "\"in-use\"");
    }

    #[test]
    fn test_update_skips_absent_fields() {
        let update = UpdateArea {
            usage: Some("Rice".to_string()),
            ..UpdateArea::default()
        };
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"usage":"Rice"}"#);
    }
}
