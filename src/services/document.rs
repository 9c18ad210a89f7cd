use crate::api::{ApiClient, ApiProvider};
use crate::error::ApiError;
use crate::models::document::{DocumentUpload, TaskDocument, UpdateTaskDocument};

pub struct TaskDocumentService<'a, T>
where
    T: ApiProvider,
{
    pub(super) client: &'a ApiClient<T>,
}

impl<T> TaskDocumentService<'_, T>
where
    T: ApiProvider,
{
    pub async fn list(&self) -> Result<Vec<TaskDocument>, ApiError> {
        self.client.get("/task-documents").await
    }

    pub async fn get(&self, id: i64) -> Result<TaskDocument, ApiError> {
        self.client.get(&format!("/task-documents/{id}")).await
    }

    pub async fn upload(&self, upload: DocumentUpload) -> Result<TaskDocument, ApiError> {
        tracing::info!(file = %upload.file_name, task = ?upload.task_id, "uploading task document");
        self.client.upload("/task-documents/upload", upload).await
    }

    pub async fn update(
        &self,
        id: i64,
        payload: &UpdateTaskDocument,
    ) -> Result<TaskDocument, ApiError> {
        self.client
            .patch(&format!("/task-documents/{id}"), payload)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/task-documents/{id}")).await
    }
}
