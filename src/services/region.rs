use crate::api::{ApiClient, ApiProvider};
use crate::error::ApiError;
use crate::models::region::{Region, RegionPayload};

pub struct RegionService<'a, T>
where
    T: ApiProvider,
{
    pub(super) client: &'a ApiClient<T>,
}

impl<T> RegionService<'_, T>
where
    T: ApiProvider,
{
    pub async fn list(&self) -> Result<Vec<Region>, ApiError> {
        self.client.get("/region").await
    }

    pub async fn get(&self, id: i64) -> Result<Region, ApiError> {
        self.client.get(&format!("/region/{id}")).await
    }

    pub async fn create(&self, payload: &RegionPayload) -> Result<Region, ApiError> {
        self.client.post("/region", payload).await
    }

    pub async fn update(&self, id: i64, payload: &RegionPayload) -> Result<Region, ApiError> {
        self.client.put(&format!("/region/{id}"), payload).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/region/{id}")).await
    }
}
