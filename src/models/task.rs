use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approver_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_task: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<TaskAttachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, rename = "created_date", skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    #[serde(default, rename = "end_date", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Reference to an uploaded task document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAttachment {
    pub document_id: i64,
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_round_trip_names() {
        let task: Task = serde_json::from_str(
            r#"{"id": 3, "title": "Prune", "assigneeId": 7, "isRecurring": true, "end_date": "2025-01-01"}"#,
        )
        .unwrap();
        assert_eq!(task.assignee_id, Some(7));
        assert!(task.is_recurring);

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["end_date"], "2025-01-01");
        assert!(json.get("cost").is_none());
    }
}
