use crate::api::{ApiClient, ApiProvider};
use crate::error::ApiError;
use crate::models::task::Task;

pub struct TaskService<'a, T>
where
    T: ApiProvider,
{
    pub(super) client: &'a ApiClient<T>,
}

impl<T> TaskService<'_, T>
where
    T: ApiProvider,
{
    pub async fn list(&self) -> Result<Vec<Task>, ApiError> {
        self.client.get("/task").await
    }

    pub async fn create(&self, task: &Task) -> Result<Task, ApiError> {
        self.client.post("/task", task).await
    }

    pub async fn update(&self, id: i64, task: &Task) -> Result<Task, ApiError> {
        self.client.put(&format!("/task/{id}"), task).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/task/{id}")).await
    }
}
