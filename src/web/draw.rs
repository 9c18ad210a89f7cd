use crate::map::{DrawEvent, DrawOptions, DrawingSurface};
use crate::utils::coordinates::{to_wire, Point, ViewState, Viewport, WireCoordinates};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// One round of map input from the browser: the state it currently shows
/// and what the operator did to it.
#[derive(Clone, Debug, Deserialize)]
pub struct DrawRequest {
    pub view_state: ViewState,
    #[serde(default)]
    pub events: Vec<DrawEvent>,
    #[serde(default)]
    pub center_override: Option<Point>,
    #[serde(default)]
    pub zoom: Option<u8>,
    #[serde(default)]
    pub viewport: Option<Viewport>,
    #[serde(default)]
    pub allow_intersection: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct DrawResponse {
    pub view_state: ViewState,
    pub wire: WireCoordinates,
    pub changes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Applies the request to a fresh drawing surface. A refused gesture stops
/// the replay; everything committed before it is kept.
pub fn replay(request: DrawRequest) -> DrawResponse {
    let mut committed: Vec<ViewState> = Vec::new();
    let mut error = None;

    let options = DrawOptions {
        allow_intersection: request.allow_intersection,
        fit_viewport: request.viewport,
    };
    let mut surface = DrawingSurface::with_options(request.view_state, options, |state| {
        committed.push(state.clone())
    });

    if let Some(center) = request.center_override {
        surface.set_center_override(Some(center));
    }
    if let Some(zoom) = request.zoom {
        surface.set_zoom(zoom);
    }
    for event in request.events {
        if let Err(e) = surface.handle(event) {
            tracing::debug!(error = %e, "draw gesture refused");
            error = Some(e.to_string());
            break;
        }
    }

    let view_state = surface.into_view_state();
    DrawResponse {
        wire: to_wire(&view_state),
        view_state,
        changes: committed.len(),
        error,
    }
}

pub async fn draw(Json(request): Json<DrawRequest>) -> Response {
    let response = replay(request);
    let status = if response.error.is_some() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::OK
    };
    (status, Json(response)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::coordinates::{default_view_state, Polygon};
    use serde_json::json;

    fn request(value: serde_json::Value) -> DrawRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_replay_created() {
        let response = replay(request(json!({
            "view_state": default_view_state(),
            "events": [{"kind": "created", "points": [[0.0, 0.0], [0.0, 2.0], [2.0, 2.0], [2.0, 0.0]]}]
        })));
        assert!(response.error.is_none());
        assert_eq!(response.changes, 1);
        assert_eq!(response.view_state.center, Point::new(1.0, 1.0));
        assert_eq!(response.view_state.zoom, 15);
        assert_eq!(response.wire.polygon, "[[0.0,0.0],[0.0,2.0],[2.0,2.0],[2.0,0.0]]");
    }

    #[test]
    fn test_replay_fits_zoom_with_viewport() {
        let response = replay(request(json!({
            "view_state": default_view_state(),
            "viewport": {"width": 800, "height": 600},
            "events": [{"kind": "created", "points": [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]]}]
        })));
        assert_ne!(response.view_state.zoom, 15);
    }

    #[test]
    fn test_replay_stops_at_refused_gesture() {
        let response = replay(request(json!({
            "view_state": default_view_state(),
            "events": [
                {"kind": "deleted"},
                {"kind": "created", "points": [[0.0, 0.0], [2.0, 2.0], [0.0, 2.0], [2.0, 0.0]]},
                {"kind": "created", "points": [[5.0, 5.0]]}
            ]
        })));
        assert_eq!(response.changes, 1);
        assert!(response.error.is_some());
        assert_eq!(response.view_state.polygon, Polygon::default());
        assert_eq!(response.wire.polygon, "[]");
    }

    #[test]
    fn test_replay_center_and_zoom_controls() {
        let response = replay(request(json!({
            "view_state": default_view_state(),
            "center_override": {"lat": 1.0, "lng": 2.0},
            "zoom": 40
        })));
        assert_eq!(response.changes, 2);
        assert_eq!(response.view_state.center, Point::new(1.0, 2.0));
        assert_eq!(response.view_state.zoom, 20);
    }

    #[tokio::test]
    async fn test_draw_handler_status() {
        let refused = draw(Json(request(json!({
            "view_state": default_view_state(),
            "events": [{"kind": "edited", "points": [[1.0, 1.0]]}, {"kind": "deleted"}, {"kind": "edited", "points": [[1.0, 1.0]]}]
        }))))
        .await;
        assert_eq!(refused.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let accepted = draw(Json(request(json!({
            "view_state": default_view_state(),
            "events": [{"kind": "deleted"}]
        }))))
        .await;
        assert_eq!(accepted.status(), StatusCode::OK);
    }
}
