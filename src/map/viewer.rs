use crate::map::{script_json, PathStyle, FIT_MAX_ZOOM, FIT_PADDING};
use crate::utils::coordinates::{Bounds, Point, Polygon, ViewState};
use crate::utils::geojson::{
    FeatureRole, GeoJsonFeature, GeoJsonFeatureCollection, GeoJsonGeometry, GeoJsonProperties,
};
use maud::{html, Markup, PreEscaped};
use serde::Serialize;

pub const PRIMARY_COLOR: &str = "#FF0000";
pub const PRIMARY_TOOLTIP: &str = "Land boundary";

pub fn status_color(status: &str) -> &'static str {
    match status {
        "available" => "#4CAF50",
        "in-use" => "#FFC107",
        "pending" => "#FF5722",
        _ => "#FF0000",
    }
}

pub fn primary_style() -> PathStyle {
    PathStyle {
        color: PRIMARY_COLOR,
        fill_color: PRIMARY_COLOR,
        fill_opacity: 0.2,
        weight: 2,
    }
}

pub fn overlay_style(status: &str, hovered: bool) -> PathStyle {
    let color = status_color(status);
    PathStyle {
        color,
        fill_color: color,
        fill_opacity: if hovered { 0.6 } else { 0.4 },
        weight: if hovered { 3 } else { 2 },
    }
}

/// A secondary shape drawn over the primary polygon, e.g. an area inside a land.
#[derive(Clone, Debug, PartialEq)]
pub struct Overlay {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub tooltip: String,
    pub polygon: Polygon,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum Camera {
    #[serde(rename_all = "camelCase")]
    FitBounds {
        bounds: Bounds,
        padding: u32,
        max_zoom: u8,
    },
    SetView { center: Point, zoom: u8 },
}

/// Projects a primary view state and its overlays onto the map. Hover is the
/// only state it keeps; the inputs are never changed.
#[derive(Clone, Debug)]
pub struct ReadOnlyMap {
    primary: ViewState,
    overlays: Vec<Overlay>,
    hovered: Option<i64>,
}

impl ReadOnlyMap {
    pub fn new(primary: ViewState, overlays: Vec<Overlay>) -> Self {
        Self {
            primary,
            overlays,
            hovered: None,
        }
    }

    pub fn primary(&self) -> &ViewState {
        &self.primary
    }

    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    pub fn camera(&self) -> Camera {
        match self.primary.polygon.bounds() {
            Some(bounds) => Camera::FitBounds {
                bounds,
                padding: FIT_PADDING,
                max_zoom: FIT_MAX_ZOOM,
            },
            None => Camera::SetView {
                center: self.primary.center,
                zoom: self.primary.zoom,
            },
        }
    }

    /// Returns false when no overlay has that id.
    pub fn hover(&mut self, id: i64) -> bool {
        if self.overlays.iter().any(|o| o.id == id) {
            self.hovered = Some(id);
            true
        } else {
            false
        }
    }

    pub fn unhover(&mut self, id: i64) {
        if self.hovered == Some(id) {
            self.hovered = None;
        }
    }

    pub fn hovered(&self) -> Option<i64> {
        self.hovered
    }

    pub fn style_of(&self, overlay: &Overlay) -> PathStyle {
        overlay_style(&overlay.status, self.hovered == Some(overlay.id))
    }

    pub fn tooltip_permanent(&self, overlay: &Overlay) -> bool {
        self.hovered == Some(overlay.id)
    }

    pub fn to_geojson(&self) -> GeoJsonFeatureCollection {
        let mut collection = GeoJsonFeatureCollection::new();

        if !self.primary.polygon.is_empty() {
            collection.features.push(GeoJsonFeature::new(
                GeoJsonGeometry::from(&self.primary.polygon),
                GeoJsonProperties {
                    id: None,
                    role: FeatureRole::Primary,
                    name: None,
                    status: None,
                    tooltip: PRIMARY_TOOLTIP.to_string(),
                    tooltip_permanent: true,
                    style: primary_style(),
                    hover_style: None,
                },
            ));
        }

        for overlay in self.overlays.iter().filter(|o| !o.polygon.is_empty()) {
            collection.features.push(GeoJsonFeature::new(
                GeoJsonGeometry::from(&overlay.polygon),
                GeoJsonProperties {
                    id: Some(overlay.id),
                    role: FeatureRole::Overlay,
                    name: Some(overlay.name.clone()),
                    status: Some(overlay.status.clone()),
                    tooltip: overlay.tooltip.clone(),
                    tooltip_permanent: self.tooltip_permanent(overlay),
                    style: self.style_of(overlay),
                    hover_style: Some(overlay_style(&overlay.status, true)),
                },
            ));
        }

        collection
    }

    pub fn render(&self, element_id: &str) -> Markup {
        html! {
            div.map id=(element_id) data-role="view" {}
            script {
                (PreEscaped(format!(
                    "LandConsole.viewMap({}, {}, {});",
                    script_json(&element_id),
                    script_json(&self.to_geojson()),
                    script_json(&self.camera())
                )))
            }
        }
    }
}
