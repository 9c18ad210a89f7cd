use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::f64::consts::PI;
use std::fmt;
use std::fmt::{Display, Formatter};

pub const DEFAULT_LAT: f64 = 21.0235276;
pub const DEFAULT_LNG: f64 = 105.8420103;
pub const DEFAULT_ZOOM: u8 = 15;
pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 20;

// Web Mercator tiles are 256px square at zoom 0
const TILE_SIZE: f64 = 256.0;
const MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_59;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lng: f64,
}

impl Point {
    pub const DEFAULT: Point = Point {
        lat: DEFAULT_LAT,
        lng: DEFAULT_LNG,
    };

    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Point {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Point> for [f64; 2] {
    fn from(point: Point) -> Self {
        [point.lat, point.lng]
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// An ordered vertex path. Serializes as `[[lat, lng], ...]`.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<[f64; 2]>", into = "Vec<[f64; 2]>")]
pub struct Polygon {
    pub points: Vec<Point>,
}

impl From<Vec<[f64; 2]>> for Polygon {
    fn from(value: Vec<[f64; 2]>) -> Self {
        Self {
            points: value.into_iter().map(Point::from).collect(),
        }
    }
}

impl From<Polygon> for Vec<[f64; 2]> {
    fn from(value: Polygon) -> Self {
        value.points.into_iter().map(<[f64; 2]>::from).collect()
    }
}

impl From<Vec<Point>> for Polygon {
    fn from(points: Vec<Point>) -> Self {
        Self { points }
    }
}

impl Polygon {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of(&self.points)
    }

    /// True when two non-adjacent edges of the closed ring touch or cross.
    /// A repeated closing vertex and zero-length edges are ignored.
    pub fn is_self_intersecting(&self) -> bool {
        let mut ring: Vec<Point> = Vec::with_capacity(self.points.len());
        for point in &self.points {
            if ring.last() != Some(point) {
                ring.push(*point);
            }
        }
        if ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }

        let n = ring.len();
        if n < 4 {
            return false;
        }

        for i in 0..n {
            let (a1, a2) = (ring[i], ring[(i + 1) % n]);
            for j in (i + 2)..n {
                // the first and last edges share the closing vertex
                if i == 0 && j == n - 1 {
                    continue;
                }
                let (b1, b2) = (ring[j], ring[(j + 1) % n]);
                if segments_intersect(a1, a2, b1, b2) {
                    return true;
                }
            }
        }
        false
    }
}

fn orientation(p: Point, q: Point, r: Point) -> f64 {
    (q.lng - p.lng) * (r.lat - p.lat) - (q.lat - p.lat) * (r.lng - p.lng)
}

fn within_box(p: Point, q: Point, r: Point) -> bool {
    q.lat <= p.lat.max(r.lat)
        && q.lat >= p.lat.min(r.lat)
        && q.lng <= p.lng.max(r.lng)
        && q.lng >= p.lng.min(r.lng)
}

fn segments_intersect(p1: Point, q1: Point, p2: Point, q2: Point) -> bool {
    let d1 = orientation(p1, q1, p2);
    let d2 = orientation(p1, q1, q2);
    let d3 = orientation(p2, q2, p1);
    let d4 = orientation(p2, q2, q1);

    let straddles = |a: f64, b: f64| (a > 0.0 && b < 0.0) || (a < 0.0 && b > 0.0);
    if straddles(d1, d2) && straddles(d3, d4) {
        return true;
    }

    (d1 == 0.0 && within_box(p1, p2, q1))
        || (d2 == 0.0 && within_box(p1, q2, q1))
        || (d3 == 0.0 && within_box(p2, p1, q2))
        || (d4 == 0.0 && within_box(p2, q1, q2))
}

/// Pixel size of the map container used when fitting bounds.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 960,
            height: 600,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Bounds {
    pub south_west: Point,
    pub north_east: Point,
}

impl Bounds {
    pub fn of(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let init = Bounds {
            south_west: *first,
            north_east: *first,
        };
        Some(points.iter().fold(init, |mut acc, p| {
            acc.south_west.lat = acc.south_west.lat.min(p.lat);
            acc.south_west.lng = acc.south_west.lng.min(p.lng);
            acc.north_east.lat = acc.north_east.lat.max(p.lat);
            acc.north_east.lng = acc.north_east.lng.max(p.lng);
            acc
        }))
    }

    pub fn center(&self) -> Point {
        Point {
            lat: (self.south_west.lat + self.north_east.lat) / 2.0,
            lng: (self.south_west.lng + self.north_east.lng) / 2.0,
        }
    }

    /// Highest zoom at which the bounds fit inside the padded viewport,
    /// never below `MIN_ZOOM` nor above `max_zoom`.
    pub fn fit_zoom(&self, viewport: Viewport, padding: u32, max_zoom: u8) -> u8 {
        let width = f64::from(viewport.width.saturating_sub(padding * 2).max(1));
        let height = f64::from(viewport.height.saturating_sub(padding * 2).max(1));

        let (x1, y1) = project(self.south_west);
        let (x2, y2) = project(self.north_east);
        let span_x = (x2 - x1).abs();
        let span_y = (y2 - y1).abs();

        let max_zoom = max_zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        (MIN_ZOOM..=max_zoom)
            .rev()
            .find(|zoom| {
                let scale = f64::from(1u32 << zoom);
                span_x * scale <= width && span_y * scale <= height
            })
            .unwrap_or(MIN_ZOOM)
    }
}

// Spherical Mercator at zoom 0
fn project(point: Point) -> (f64, f64) {
    let lat = point.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT);
    let sin = lat.to_radians().sin();
    let x = (point.lng + 180.0) / 360.0 * TILE_SIZE;
    let y = (0.5 - ((1.0 + sin) / (1.0 - sin)).ln() / (4.0 * PI)) * TILE_SIZE;
    (x, y)
}

/// Polygon, center and zoom as the map widgets use them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub polygon: Polygon,
    pub center: Point,
    pub zoom: u8,
}

impl Default for ViewState {
    fn default() -> Self {
        default_view_state()
    }
}

/// The storage encoding: polygon and center are JSON text columns.
///
/// Reading is lenient. A field may also arrive as the native array or
/// object, as null, or not at all; `decode_view_state` sorts it out.
/// `to_wire` always produces the text form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WireCoordinates {
    #[serde(default)]
    pub polygon: Value,
    #[serde(default)]
    pub center: Value,
    #[serde(default, deserialize_with = "deserialize_zoom")]
    pub zoom: u8,
}

// The backend may send a float, null, or nothing at all; anything unusable
// becomes 0 and decodes to the default zoom.
fn deserialize_zoom<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let zoom = Option::<f64>::deserialize(deserializer)?;
    Ok(match zoom {
        Some(z) if z.is_finite() && z >= 0.0 => z.round().min(f64::from(u8::MAX)) as u8,
        _ => 0,
    })
}

#[derive(Clone, Debug, PartialEq)]
pub enum Decoded<T> {
    Parsed(T),
    Defaulted(T),
}

impl<T> Decoded<T> {
    pub fn value(&self) -> &T {
        match self {
            Decoded::Parsed(v) | Decoded::Defaulted(v) => v,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Decoded::Parsed(v) | Decoded::Defaulted(v) => v,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, Decoded::Defaulted(_))
    }
}

/// Per-field decode result, so callers can tell parsed data from fallbacks.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedViewState {
    pub polygon: Decoded<Polygon>,
    pub center: Decoded<Point>,
    pub zoom: Decoded<u8>,
}

impl DecodedViewState {
    /// Used when an entity carries no coordinates at all.
    pub fn defaulted() -> Self {
        let fallback = default_view_state();
        Self {
            polygon: Decoded::Defaulted(fallback.polygon),
            center: Decoded::Defaulted(fallback.center),
            zoom: Decoded::Defaulted(fallback.zoom),
        }
    }

    pub fn is_fully_parsed(&self) -> bool {
        !(self.polygon.is_defaulted() || self.center.is_defaulted() || self.zoom.is_defaulted())
    }

    pub fn view_state(&self) -> ViewState {
        self.clone().into_view_state()
    }

    pub fn into_view_state(self) -> ViewState {
        ViewState {
            polygon: self.polygon.into_value(),
            center: self.center.into_value(),
            zoom: self.zoom.into_value(),
        }
    }
}

pub fn default_view_state() -> ViewState {
    ViewState {
        polygon: Polygon {
            points: vec![Point::DEFAULT],
        },
        center: Point::DEFAULT,
        zoom: DEFAULT_ZOOM,
    }
}

/// Arithmetic mean of the vertices, or the default center for no vertices.
pub fn compute_center(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::DEFAULT;
    }

    let count = points.len() as f64;
    let sum = points.iter().fold(Point::new(0.0, 0.0), |mut acc, p| {
        acc.lat += p.lat;
        acc.lng += p.lng;
        acc
    });

    Point {
        lat: sum.lat / count,
        lng: sum.lng / count,
    }
}

pub fn to_wire(view_state: &ViewState) -> WireCoordinates {
    WireCoordinates {
        polygon: Value::String(
            serde_json::to_string(&view_state.polygon).unwrap_or_else(|_| "[]".to_string()),
        ),
        center: Value::String(
            serde_json::to_string(&view_state.center)
                .unwrap_or_else(|_| format!("{{\"lat\":{DEFAULT_LAT},\"lng\":{DEFAULT_LNG}}}")),
        ),
        zoom: view_state.zoom,
    }
}

// Text columns hold JSON; anything else is taken as the value itself.
fn decode_field<T>(raw: &Value) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned,
{
    match raw {
        Value::String(text) => serde_json::from_str(text),
        other => T::deserialize(other),
    }
}

pub fn decode_view_state(wire: &WireCoordinates) -> DecodedViewState {
    let fallback = default_view_state();

    let polygon = match decode_field::<Polygon>(&wire.polygon) {
        Ok(polygon) => Decoded::Parsed(polygon),
        Err(e) => {
            tracing::warn!(error = %e, raw = %wire.polygon, "could not parse polygon, using default");
            Decoded::Defaulted(fallback.polygon)
        }
    };

    let center = match decode_field::<Point>(&wire.center) {
        Ok(center) => Decoded::Parsed(center),
        Err(e) => {
            tracing::warn!(error = %e, raw = %wire.center, "could not parse center, using default");
            Decoded::Defaulted(fallback.center)
        }
    };

    let zoom = if wire.zoom == 0 {
        Decoded::Defaulted(fallback.zoom)
    } else {
        Decoded::Parsed(wire.zoom)
    };

    DecodedViewState {
        polygon,
        center,
        zoom,
    }
}

/// Never fails; broken fields fall back to the default independently.
pub fn to_view_state(wire: &WireCoordinates) -> ViewState {
    decode_view_state(wire).into_view_state()
}

impl From<&ViewState> for WireCoordinates {
    fn from(value: &ViewState) -> Self {
        to_wire(value)
    }
}

impl From<&WireCoordinates> for ViewState {
    fn from(value: &WireCoordinates) -> Self {
        to_view_state(value)
    }
}
