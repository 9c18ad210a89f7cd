use crate::api::{ApiClient, ApiProvider};
use crate::error::ApiError;
use crate::utils::coordinates::{decode_view_state, DecodedViewState, ViewState, WireCoordinates};

/// Reads and writes only the coordinate object of a land. This endpoint
/// speaks native arrays and objects rather than text columns.
pub struct LandCoordinateService<'a, T>
where
    T: ApiProvider,
{
    pub(super) client: &'a ApiClient<T>,
}

impl<T> LandCoordinateService<'_, T>
where
    T: ApiProvider,
{
    pub async fn get(&self, land_id: i64) -> Result<DecodedViewState, ApiError> {
        let wire: WireCoordinates = self
            .client
            .get(&format!("/lands/{land_id}/coordinates"))
            .await?;
        Ok(decode_view_state(&wire))
    }

    pub async fn put(
        &self,
        land_id: i64,
        view_state: &ViewState,
    ) -> Result<DecodedViewState, ApiError> {
        let wire: WireCoordinates = self
            .client
            .put(&format!("/lands/{land_id}/coordinates"), view_state)
            .await?;
        Ok(decode_view_state(&wire))
    }
}
