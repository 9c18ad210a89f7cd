use crate::error::DrawError;
use crate::map::{script_json, FIT_MAX_ZOOM, FIT_PADDING};
use crate::utils::coordinates::{compute_center, Point, Polygon, ViewState, Viewport, MAX_ZOOM, MIN_ZOOM};
use maud::{html, Markup, PreEscaped};
use serde::Deserialize;

/// A finished gesture on the drawing layer.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", content = "points", rename_all = "lowercase")]
pub enum DrawEvent {
    Created(Polygon),
    Edited(Polygon),
    Deleted,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawOptions {
    pub allow_intersection: bool,
    /// When set, a newly created shape re-fits the zoom to its bounds.
    pub fit_viewport: Option<Viewport>,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            allow_intersection: false,
            fit_viewport: None,
        }
    }
}

/// Holds at most one editable polygon and reports every change through
/// `on_change`. Nothing is persisted here.
pub struct DrawingSurface<F>
where
    F: FnMut(&ViewState),
{
    view_state: ViewState,
    layer: Option<Polygon>,
    center_override: Option<Point>,
    options: DrawOptions,
    on_change: F,
}

impl<F> DrawingSurface<F>
where
    F: FnMut(&ViewState),
{
    pub fn new(initial: ViewState, on_change: F) -> Self {
        Self::with_options(initial, DrawOptions::default(), on_change)
    }

    pub fn with_options(initial: ViewState, options: DrawOptions, on_change: F) -> Self {
        let layer = (!initial.polygon.is_empty()).then(|| initial.polygon.clone());
        Self {
            view_state: initial,
            layer,
            center_override: None,
            options,
            on_change,
        }
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    pub fn into_view_state(self) -> ViewState {
        self.view_state
    }

    pub fn drawn_layer(&self) -> Option<&Polygon> {
        self.layer.as_ref()
    }

    pub fn handle(&mut self, event: DrawEvent) -> Result<(), DrawError> {
        match event {
            DrawEvent::Created(shape) => {
                self.check_shape(&shape)?;
                self.view_state.center = self.center_for(&shape);
                if let (Some(viewport), Some(bounds)) = (self.options.fit_viewport, shape.bounds()) {
                    self.view_state.zoom = bounds.fit_zoom(viewport, FIT_PADDING, FIT_MAX_ZOOM);
                }
                self.layer = Some(shape.clone());
                self.view_state.polygon = shape;
            }
            DrawEvent::Edited(shape) => {
                if self.layer.is_none() {
                    return Err(DrawError::NothingToEdit);
                }
                self.check_shape(&shape)?;
                self.view_state.center = self.center_for(&shape);
                self.layer = Some(shape.clone());
                self.view_state.polygon = shape;
            }
            DrawEvent::Deleted => {
                self.layer = None;
                self.view_state.polygon = Polygon::default();
            }
        }
        self.emit();
        Ok(())
    }

    /// An explicit center wins over the computed one until cleared.
    pub fn set_center_override(&mut self, center: Option<Point>) {
        self.center_override = center;
        match center {
            Some(center) => self.view_state.center = center,
            None => {
                if let Some(layer) = &self.layer {
                    self.view_state.center = compute_center(&layer.points);
                }
            }
        }
        self.emit();
    }

    pub fn set_zoom(&mut self, zoom: u8) {
        self.view_state.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.emit();
    }

    fn check_shape(&self, shape: &Polygon) -> Result<(), DrawError> {
        if shape.is_empty() {
            return Err(DrawError::EmptyShape);
        }
        if !self.options.allow_intersection && shape.is_self_intersecting() {
            return Err(DrawError::SelfIntersecting);
        }
        Ok(())
    }

    fn center_for(&self, shape: &Polygon) -> Point {
        self.center_override
            .unwrap_or_else(|| compute_center(&shape.points))
    }

    fn emit(&mut self) {
        (self.on_change)(&self.view_state);
    }
}

/// Map container plus the hidden inputs the surrounding form submits.
pub fn render(element_id: &str, view_state: &ViewState) -> Markup {
    let polygon = serde_json::to_string(&view_state.polygon).unwrap_or_else(|_| "[]".to_string());
    html! {
        div.map id=(element_id) data-role="draw" {}
        input type="hidden" name="polygon" value=(polygon);
        label {
            "Center (lat,lng)"
            input type="text" name="center" value=(view_state.center.to_string());
        }
        label {
            "Zoom"
            input type="number" name="zoom" min=(MIN_ZOOM) max=(MAX_ZOOM) value=(view_state.zoom);
        }
        script {
            (PreEscaped(format!(
                "LandConsole.drawMap({}, {});",
                script_json(&element_id),
                script_json(view_state)
            )))
        }
    }
}
