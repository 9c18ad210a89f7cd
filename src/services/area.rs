use crate::api::{ApiClient, ApiProvider};
use crate::error::ApiError;
use crate::models::area::{Area, AreaResponse, CreateArea, UpdateArea};
use crate::models::task::Task;
use serde_json::{json, Value};

pub struct AreaService<'a, T>
where
    T: ApiProvider,
{
    pub(super) client: &'a ApiClient<T>,
}

impl<T> AreaService<'_, T>
where
    T: ApiProvider,
{
    pub async fn list(&self) -> Result<Vec<Area>, ApiError> {
        let areas: Vec<AreaResponse> = self.client.get("/areas").await?;
        Ok(areas.into_iter().map(Area::from).collect())
    }

    pub async fn get(&self, id: i64) -> Result<Area, ApiError> {
        let area: AreaResponse = self.client.get(&format!("/areas/{id}")).await?;
        Ok(area.into())
    }

    pub async fn by_land(&self, land_id: i64) -> Result<Vec<Area>, ApiError> {
        let areas: Vec<AreaResponse> = self.client.get(&format!("/areas/land/{land_id}")).await?;
        Ok(areas.into_iter().map(Area::from).collect())
    }

    pub async fn create(&self, payload: &CreateArea) -> Result<Area, ApiError> {
        tracing::info!(land = payload.land_id, name = %payload.name, "creating area");
        let area: AreaResponse = self.client.post("/areas", payload).await?;
        Ok(area.into())
    }

    pub async fn update(&self, id: i64, payload: &UpdateArea) -> Result<Area, ApiError> {
        let area: AreaResponse = self.client.put(&format!("/areas/{id}"), payload).await?;
        Ok(area.into())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        tracing::info!(area = id, "deleting area");
        self.client.delete(&format!("/areas/{id}")).await
    }

    pub async fn assign_employee(&self, area_id: i64, employee_id: i64) -> Result<Value, ApiError> {
        self.client
            .post(&format!("/areas/{area_id}/employees/{employee_id}"), &json!({}))
            .await
    }

    pub async fn remove_employee(&self, area_id: i64, employee_id: i64) -> Result<(), ApiError> {
        self.client
            .delete(&format!("/areas/{area_id}/employees/{employee_id}"))
            .await
    }

    pub async fn add_task(&self, area_id: i64, task: &Task) -> Result<Task, ApiError> {
        self.client.post(&format!("/areas/{area_id}/tasks"), task).await
    }

    pub async fn remove_task(&self, area_id: i64, task_id: i64) -> Result<(), ApiError> {
        self.client
            .delete(&format!("/areas/{area_id}/tasks/{task_id}"))
            .await
    }
}
