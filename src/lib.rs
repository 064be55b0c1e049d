//! Word-wrapped text labels confined to rectangles on a map.
//!
//! A [`TextBox`] is a geographic rectangle carrying a label. The label is
//! anchored at the rectangle's projected north-west corner, greedily wrapped
//! to the rectangle's on-screen width, and scaled with the zoom level, so it
//! reads as if printed on the map. Every pan, zoom or geometry change
//! re-measures and re-wraps it.
//!
//! ```
//! use textbox::{LatLng, LatLngBounds, Map, MapView, SvgSurface, TextBox, Zoom};
//!
//! let view = MapView::new(LatLng::new(51.5, -0.12), Zoom(13.0), 800.0, 600.0);
//! let mut map = Map::new(view, SvgSurface::new(800.0, 600.0));
//!
//! let bounds = LatLngBounds::new(LatLng::new(51.49, -0.14), LatLng::new(51.51, -0.10));
//! let id = map.add_layer(TextBox::new(bounds));
//! map.set_text(id, Some("Somewhere in London"), None);
//!
//! assert!(map.to_svg_string().contains("<tspan"));
//! ```

pub mod defaults;
pub mod errors;
pub mod label;
pub mod layer;
pub mod layout;
pub mod log;
pub mod map;
pub mod options;
pub mod shapes;
pub mod surface;
pub mod types;
pub mod view;

pub use errors::{SurfaceError, ViewError};
pub use label::{Host, Label};
pub use layer::{Labelable, Layer, LayerGroup, MapLayer};
pub use layout::{
    LayoutResult, Line, MonospaceMetrics, ProportionalMetrics, TextMetrics, font_scale, wrap,
};
pub use map::{LayerId, Map};
pub use options::{LabelOptions, RectangleStyle};
pub use shapes::{CircleMarker, Rectangle, TextBox};
pub use surface::{ElementKind, NodeId, RenderSurface, SvgSurface};
pub use types::{LatLng, LatLngBounds, NumericError, Px, Scale, ScreenPoint, Zoom};
pub use view::{MapView, Projection, ViewContext};
