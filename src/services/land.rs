use crate::api::{ApiClient, ApiProvider};
use crate::error::ApiError;
use crate::models::land::{CreateLand, Land, LandResponse, UpdateLand};

/// Lands come back with their coordinates, and those of their areas,
/// already decoded.
pub struct LandService<'a, T>
where
    T: ApiProvider,
{
    pub(super) client: &'a ApiClient<T>,
}

impl<T> LandService<'_, T>
where
    T: ApiProvider,
{
    pub async fn list(&self) -> Result<Vec<Land>, ApiError> {
        let lands: Vec<LandResponse> = self.client.get("/land").await?;
        Ok(lands.into_iter().map(Land::from).collect())
    }

    pub async fn get(&self, id: i64) -> Result<Land, ApiError> {
        let land: LandResponse = self.client.get(&format!("/land/{id}")).await?;
        Ok(land.into())
    }

    pub async fn by_region(&self, region_id: i64) -> Result<Vec<Land>, ApiError> {
        let lands: Vec<LandResponse> = self
            .client
            .get(&format!("/land/region/{region_id}"))
            .await?;
        Ok(lands.into_iter().map(Land::from).collect())
    }

    pub async fn create(&self, payload: &CreateLand) -> Result<Land, ApiError> {
        tracing::info!(name = %payload.name, "creating land");
        let land: LandResponse = self.client.post("/land", payload).await?;
        Ok(land.into())
    }

    pub async fn update(&self, id: i64, payload: &UpdateLand) -> Result<Land, ApiError> {
        let land: LandResponse = self.client.put(&format!("/land/{id}"), payload).await?;
        Ok(land.into())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        tracing::info!(land = id, "deleting land");
        self.client.delete(&format!("/land/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApiProvider;
    use crate::api::Method;
    use crate::models::land::{LandOwner, LandRegion};
    use crate::utils::coordinates::{default_view_state, to_wire, Point, Polygon, ViewState};
    use serde_json::json;

    #[tokio::test]
    async fn test_get_decodes_coordinates() {
        let provider = MockApiProvider::new().with_response(
            Method::Get,
            "/land/3",
            json!({
                "id": 3,
                "name": "Hillside",
                "coordinate": {"polygon": "[[1,2],[3,4],[5,0]]", "center": "not json", "zoom": 0},
                "areas": [{"id": 7, "status": "pending"}]
            }),
        );
        let client = ApiClient::new(provider);

        let land = client.lands().get(3).await.unwrap();
        assert!(!land.coordinate.polygon.is_defaulted());
        assert!(land.coordinate.center.is_defaulted());
        assert!(land.coordinate.zoom.is_defaulted());
        assert_eq!(land.view_state().zoom, 15);
        assert_eq!(land.areas[0].view_state(), default_view_state());
    }

    #[tokio::test]
    async fn test_get_accepts_null_and_native_coordinates() {
        let provider = MockApiProvider::new()
            .with_response(
                Method::Get,
                "/land/3",
                json!({
                    "id": 3,
                    "coordinate": {"polygon": "[[1,2],[3,4]]", "center": null, "zoom": 12}
                }),
            )
            .with_response(
                Method::Get,
                "/land/4",
                json!({
                    "id": 4,
                    "coordinate": {"polygon": [[1, 2], [3, 4]], "center": {"lat": 2, "lng": 3}, "zoom": 12},
                    "areas": [{"id": 7, "coordinates": {"polygon": null, "center": null}}]
                }),
            );
        let client = ApiClient::new(provider);

        let land = client.lands().get(3).await.unwrap();
        assert!(!land.coordinate.polygon.is_defaulted());
        assert!(land.coordinate.center.is_defaulted());

        let land = client.lands().get(4).await.unwrap();
        assert!(land.coordinate.is_fully_parsed());
        assert_eq!(land.view_state().center, Point::new(2.0, 3.0));
        assert_eq!(land.areas[0].view_state(), default_view_state());
    }

    #[tokio::test]
    async fn test_create_sends_wire_coordinates() {
        let view_state = ViewState {
            polygon: Polygon::from(vec![Point::new(10.0, 20.5)]),
            center: Point::new(15.0, 25.0),
            zoom: 12,
        };
        let provider = MockApiProvider::new().with_response(
            Method::Post,
            "/land",
            json!({"id": 11, "name": "New", "coordinate": to_wire(&view_state)}),
        );
        let client = ApiClient::new(provider);

        let payload = CreateLand {
            name: "New".to_string(),
            address: String::new(),
            area: 0.0,
            price: 0.0,
            location: String::new(),
            area_count: 0,
            properties: vec![],
            coordinate: to_wire(&view_state),
            planning_map_url: String::new(),
            google_map_url: String::new(),
            owner: LandOwner::default(),
            region: LandRegion::default(),
        };
        let land = client.lands().create(&payload).await.unwrap();
        assert_eq!(land.view_state(), view_state);

        let sent = client.provider.requests().await;
        let body = sent[0].body.as_ref().unwrap();
        assert_eq!(body["coordinate"]["polygon"], "[[10.0,20.5]]");
        assert_eq!(body["coordinate"]["center"], r#"{"lat":15.0,"lng":25.0}"#);
        assert_eq!(body["coordinate"]["zoom"], 12);
    }

    #[tokio::test]
    async fn test_by_region_path() {
        let provider =
            MockApiProvider::new().with_response(Method::Get, "/land/region/5", json!([]));
        let client = ApiClient::new(provider);
        assert!(client.lands().by_region(5).await.unwrap().is_empty());
    }
}
