use crate::api::{ApiClient, ApiProvider};
use crate::error::ApiError;
use crate::models::land::{Land, LandResponse};
use crate::models::owner::{Owner, OwnerPayload};

pub struct OwnerService<'a, T>
where
    T: ApiProvider,
{
    pub(super) client: &'a ApiClient<T>,
}

impl<T> OwnerService<'_, T>
where
    T: ApiProvider,
{
    pub async fn list(&self) -> Result<Vec<Owner>, ApiError> {
        self.client.get("/owner").await
    }

    pub async fn get(&self, id: i64) -> Result<Owner, ApiError> {
        self.client.get(&format!("/owner/{id}")).await
    }

    pub async fn lands(&self, id: i64) -> Result<Vec<Land>, ApiError> {
        let lands: Vec<LandResponse> = self.client.get(&format!("/owner/{id}/lands")).await?;
        Ok(lands.into_iter().map(Land::from).collect())
    }

    pub async fn create(&self, payload: &OwnerPayload) -> Result<Owner, ApiError> {
        self.client.post("/owner", payload).await
    }

    pub async fn update(&self, id: i64, payload: &OwnerPayload) -> Result<Owner, ApiError> {
        self.client.put(&format!("/owner/{id}"), payload).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/owner/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::mock::MockApiProvider;
    use crate::api::{ApiClient, Method};
    use serde_json::json;

    #[tokio::test]
    async fn test_owner_lands() {
        let provider = MockApiProvider::new().with_response(
            Method::Get,
            "/owner/2/lands",
            json!([{"id": 1, "name": "Riverside"}]),
        );
        let client = ApiClient::new(provider);

        let lands = client.owners().lands(2).await.unwrap();
        assert_eq!(lands[0].name, "Riverside");
        assert!(lands[0].coordinate.polygon.is_defaulted());
    }
}
