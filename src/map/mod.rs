pub mod drawing;
pub mod viewer;

use serde::Serialize;

pub use drawing::{DrawEvent, DrawOptions, DrawingSurface};
pub use viewer::{status_color, Camera, Overlay, ReadOnlyMap};

/// Fit-bounds never zooms in further than this.
pub const FIT_MAX_ZOOM: u8 = 18;
pub const FIT_PADDING: u32 = 50;

/// Leaflet path options.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStyle {
    pub color: &'static str,
    pub fill_color: &'static str,
    pub fill_opacity: f64,
    pub weight: u8,
}

/// JSON for embedding inside a `<script>` element.
pub(crate) fn script_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace('<', "\\u003c")
}
