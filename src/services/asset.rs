use crate::api::{ApiClient, ApiProvider};
use crate::error::ApiError;
use crate::models::asset::{Asset, CreateAsset};

pub struct AssetService<'a, T>
where
    T: ApiProvider,
{
    pub(super) client: &'a ApiClient<T>,
}

impl<T> AssetService<'_, T>
where
    T: ApiProvider,
{
    pub async fn list(&self) -> Result<Vec<Asset>, ApiError> {
        self.client.get("/asset").await
    }

    pub async fn by_category(&self, category: &str) -> Result<Vec<Asset>, ApiError> {
        self.client
            .get(&format!("/asset/by-category/{category}"))
            .await
    }

    pub async fn get(&self, id: i64) -> Result<Asset, ApiError> {
        self.client.get(&format!("/asset/{id}")).await
    }

    pub async fn create(&self, payload: CreateAsset) -> Result<Asset, ApiError> {
        let payload = payload.with_defaults();
        self.client.post("/asset/create", &payload).await
    }

    pub async fn update(&self, id: i64, payload: &CreateAsset) -> Result<Asset, ApiError> {
        self.client.put(&format!("/asset/{id}"), payload).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/asset/{id}")).await
    }
}
