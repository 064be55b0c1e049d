//! Default label and surface settings (screen pixels unless noted)

use crate::types::{Px, Zoom};

pub const FILL_COLOR: &str = "black";
pub const FONT_SIZE: Px = Px(12.0);
/// Zoom level at which labels render at `FONT_SIZE`.
pub const REFERENCE_ZOOM: Zoom = Zoom(13.0);
pub const LINE_HEIGHT: f64 = 1.2;
/// Glyph advance for monospace text, in ems.
pub const MONO_ADVANCE: f64 = 0.6;
pub const BOLD_FACTOR: f64 = 1.1;
pub const STROKE_COLOR: &str = "#3388ff";
pub const STROKE_WIDTH: Px = Px(3.0);
pub const FILL_OPACITY: f64 = 0.2;
/// Web-Mercator tile edge.
pub const TILE_SIZE: f64 = 256.0;
pub const MAX_LATITUDE: f64 = 85.051_128_779_8;
