use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDocument {
    pub id: i64,
    pub file_name: String,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub task_id: i64,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<i64>,
}

/// A file to attach to a task, sent as multipart form data.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentUpload {
    pub file_name: String,
    pub data: Vec<u8>,
    pub task_id: Option<i64>,
    pub description: Option<String>,
}

impl DocumentUpload {
    /// Text parts that go next to the file part.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(task_id) = self.task_id {
            fields.push(("taskId", task_id.to_string()));
        }
        if let Some(description) = &self.description {
            fields.push(("description", description.clone()));
        }
        fields
    }
}
