use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub area_id: Option<i64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDetails {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_id: Option<i64>,
}

/// New employees get a login account in the same request.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployee {
    #[serde(flatten)]
    pub details: EmployeeDetails,
    pub user: EmployeeAccount,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeAccount {
    pub username: String,
    pub password: String,
    pub role_ids: Vec<i64>,
}

impl CreateEmployee {
    /// The username falls back to the email when left blank.
    pub fn new(details: EmployeeDetails, username: Option<String>, password: String, role_id: i64) -> Self {
        let username = username
            .filter(|u| !u.trim().is_empty())
            .or_else(|| details.email.clone())
            .unwrap_or_default();
        Self {
            details,
            user: EmployeeAccount {
                username,
                password,
                role_ids: vec![role_id],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_employee_payload() {
        let details = EmployeeDetails {
            name: "Lan".to_string(),
            email: Some("lan@example.com".to_string()),
            ..EmployeeDetails::default()
        };
        let payload = CreateEmployee::new(details, Some(" ".to_string()), "s3cret".to_string(), 2);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["name"], "Lan");
        assert_eq!(json["user"]["username"], "lan@example.com");
        assert_eq!(json["user"]["roleIds"][0], 2);
        assert!(json.get("phone").is_none());
    }
}
