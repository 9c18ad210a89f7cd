pub mod area;
pub mod asset;
pub mod auth;
pub mod document;
pub mod employee;
pub mod land;
pub mod owner;
pub mod region;
pub mod task;

use serde::{Deserialize, Serialize};

/// Free-form key/value pair attached to lands and assets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub key: String,
    pub value: PropertyValue,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyValue::Flag(v) => write!(f, "{}", if *v { "yes" } else { "no" }),
            PropertyValue::Number(v) => write!(f, "{v}"),
            PropertyValue::Text(v) => write!(f, "{v}"),
        }
    }
}

/// `{id, name}` reference the backend embeds in other entities.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_values() {
        let props: Vec<Property> = serde_json::from_str(
            r#"[{"key":"Frontage","value":"0m"},{"key":"Length","value":12.5},{"key":"Red book","value":false}]"#,
        )
        .unwrap();
        assert_eq!(props[0].value, PropertyValue::Text("0m".to_string()));
        assert_eq!(props[1].value, PropertyValue::Number(12.5));
        assert_eq!(props[2].value, PropertyValue::Flag(false));
        assert_eq!(props[2].value.to_string(), "no");
    }
}
