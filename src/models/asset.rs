use crate::models::{NamedRef, Property};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub r#type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub purchase_date: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub land_name: Option<String>,
    #[serde(default)]
    pub area_name: Option<String>,
    #[serde(default)]
    pub area: Option<NamedRef>,
    #[serde(default)]
    pub plant_info: Option<PlantInfo>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantInfo {
    pub age: u32,
    pub watering_schedule: WateringSchedule,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WateringSchedule {
    pub frequency: WateringFrequency,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WateringFrequency {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAsset {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub r#type: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<String>,
    pub value: f64,
    pub category: String,
    pub quantity: u32,
    pub properties: Vec<Property>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub land_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plant_info: Option<PlantInfo>,
}

impl CreateAsset {
    /// Blank type/status/category and a zero quantity get the console's
    /// defaults before sending.
    pub fn with_defaults(mut self) -> Self {
        if self.r#type.trim().is_empty() {
            self.r#type = "equipment".to_string();
        }
        if self.status.trim().is_empty() {
            self.status = "available".to_string();
        }
        if self.category.trim().is_empty() {
            self.category = "other".to_string();
        }
        if self.quantity == 0 {
            self.quantity = 1;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_defaults() {
        let asset = CreateAsset {
            name: "Pump".to_string(),
            description: None,
            r#type: String::new(),
            status: " ".to_string(),
            location: None,
            purchase_date: None,
            value: 0.0,
            category: String::new(),
            quantity: 0,
            properties: vec![],
            land_id: None,
            area_id: Some(2),
            plant_info: None,
        }
        .with_defaults();
        assert_eq!(asset.r#type, "equipment");
        assert_eq!(asset.status, "available");
        assert_eq!(asset.category, "other");
        assert_eq!(asset.quantity, 1);

        let json = serde_json::to_value(&asset).unwrap();
        assert_eq!(json["type"], "equipment");
        assert_eq!(json["areaId"], 2);
    }

    #[test]
    fn test_plant_info() {
        let asset: Asset = serde_json::from_str(
            r#"{"id":1,"name":"Mango","type":"plant","plantInfo":{"age":3,"wateringSchedule":{"frequency":"weekly","amount":20}}}"#,
        )
        .unwrap();
        let info = asset.plant_info.unwrap();
        assert_eq!(info.watering_schedule.frequency, WateringFrequency::Weekly);
    }
}
