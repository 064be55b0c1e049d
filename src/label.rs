//! The label node manager.
//!
//! A [`Label`] owns at most one rendered text node on the surface. Every
//! redraw throws the previous node away and builds a fresh one from the
//! stored text, the host's *current* projected bounds and the zoom-derived
//! font scale; nothing geometric is cached between redraws.
//!
//! The node is either **absent** or **attached**. Going to attached always
//! detaches first, so a redraw that changes the number of lines can never
//! leave half of an old node behind.

use crate::errors::SurfaceError;
use crate::layout::{LayoutResult, font_scale, wrap};
use crate::options::LabelOptions;
use crate::surface::{NodeId, RenderSurface, fmt_num};
use crate::types::{LatLngBounds, Px, Scale, ScreenPoint};
use crate::view::{Projection, ViewContext};

/// Class set on labels of interactive shapes
pub const INTERACTIVE_CLASS: &str = "interactive";

/// What a label needs to know about the shape it is attached to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Host {
    pub bounds: LatLngBounds,
    /// The shape's own visual, present while the shape is on a view
    pub node: Option<NodeId>,
    pub interactive: bool,
}

/// Anchor and available width, projected fresh on every redraw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Projected north-west corner
    pub anchor: ScreenPoint,
    /// Projected east-west extent
    pub width: Px,
}

impl Geometry {
    pub fn capture(bounds: &LatLngBounds, projection: &dyn Projection) -> Self {
        let north_west = projection.lat_lng_to_screen_point(bounds.north_west());
        let south_east = projection.lat_lng_to_screen_point(bounds.south_east());
        Self {
            anchor: north_west,
            width: Px(south_east.x - north_west.x),
        }
    }
}

/// Text overlay state for one rectangle
#[derive(Debug, Clone, Default)]
pub struct Label {
    text: Option<String>,
    options: LabelOptions,
    node: Option<NodeId>,
    layout: Option<LayoutResult>,
}

impl Label {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn options(&self) -> &LabelOptions {
        &self.options
    }

    /// The currently attached text node, if any
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    pub fn is_rendered(&self) -> bool {
        self.node.is_some()
    }

    /// Layout behind the currently attached node
    pub fn layout(&self) -> Option<&LayoutResult> {
        self.layout.as_ref()
    }

    /// Store `text` and `options`, then redraw if the label can render right
    /// now. Without a view, or while the host is not drawn, the values are
    /// only stored; the next [`attach_to_view`](Self::attach_to_view) renders
    /// them. `None` options mean the defaults.
    pub fn set_text(
        &mut self,
        text: Option<&str>,
        options: Option<LabelOptions>,
        host: &Host,
        view: Option<&mut ViewContext<'_>>,
    ) {
        self.text = text.map(str::to_owned);
        self.options = options.unwrap_or_default();
        self.redraw(host, view);
    }

    /// Rebuild the node from the stored text and options against the host's
    /// current geometry
    pub fn redraw(&mut self, host: &Host, view: Option<&mut ViewContext<'_>>) {
        let Some(view) = view else {
            return;
        };
        if host.node.is_none() {
            return;
        }

        self.detach(view.surface);

        let Some(text) = self.text.as_deref().filter(|t| !t.trim().is_empty()) else {
            return;
        };

        match build(text, &self.options, host, view) {
            Ok((node, layout)) => {
                self.node = Some(node);
                self.layout = Some(layout);
            }
            Err(err) => {
                crate::log::warn!(error = %err, "label could not be rendered");
            }
        }
    }

    /// The host was added to a view: render whatever was stored meanwhile
    pub fn attach_to_view(&mut self, host: &Host, view: &mut ViewContext<'_>) {
        self.redraw(host, Some(view));
    }

    /// The host is leaving the view: drop the node, keep the text
    pub fn detach_from_view(&mut self, view: &mut ViewContext<'_>) {
        self.detach(view.surface);
    }

    /// Remove the current node, if there is one. Never detaches twice: the
    /// reference is cleared before the surface is touched.
    fn detach(&mut self, surface: &mut dyn RenderSurface) {
        let Some(node) = self.node.take() else {
            return;
        };
        self.layout = None;

        let parent = surface.parent_of(node).unwrap_or_else(|| surface.root());
        if let Err(err) = surface.remove_child(parent, node) {
            crate::log::warn!(error = %err, node = %node, "label node was already gone");
        }
    }
}

/// Create, attach and fill a text node. On failure the partial node is
/// removed again.
fn build(
    text: &str,
    options: &LabelOptions,
    host: &Host,
    view: &mut ViewContext<'_>,
) -> Result<(NodeId, LayoutResult), SurfaceError> {
    let geometry = Geometry::capture(&host.bounds, view.projection);
    let scale = font_scale(view.projection.zoom(), options.reference_zoom);
    let surface = &mut *view.surface;
    let root = surface.root();

    let node = surface.create_text_element();
    match host.node.filter(|&shape| surface.parent_of(shape) == Some(root)) {
        Some(shape) if options.below => surface.insert_before(root, node, shape)?,
        _ => surface.append_child(root, node)?,
    }

    match fill(node, text, options, host, geometry, scale, surface) {
        Ok(layout) => {
            crate::log::debug!(
                chars = text.len(),
                x = geometry.anchor.x,
                y = geometry.anchor.y,
                width = geometry.width.0,
                scale = scale.0,
                lines = layout.lines().len(),
                "label redrawn"
            );
            Ok((node, layout))
        }
        Err(err) => {
            if let Err(cleanup) = surface.remove_child(root, node) {
                crate::log::warn!(
                    error = %cleanup,
                    node = %node,
                    "partial label node left behind"
                );
            }
            Err(err)
        }
    }
}

fn fill(
    node: NodeId,
    text: &str,
    options: &LabelOptions,
    host: &Host,
    geometry: Geometry,
    scale: Scale,
    surface: &mut dyn RenderSurface,
) -> Result<LayoutResult, SurfaceError> {
    let font_px = scale * options.font_size;
    let x = fmt_num(geometry.anchor.x);

    surface.set_attribute(node, "x", &x)?;
    surface.set_attribute(node, "y", &fmt_num(geometry.anchor.y))?;
    surface.set_attribute(node, "fill", &options.fill_color)?;
    surface.set_attribute(node, "font-size", &fmt_num(font_px.0))?;
    for (name, value) in &options.attributes {
        surface.set_attribute(node, name, value)?;
    }
    if host.interactive {
        surface.set_attribute(node, "class", INTERACTIVE_CLASS)?;
    }

    // The node now carries the scaled font, so measuring against it already
    // accounts for the scale
    let layout = wrap(
        text,
        geometry.width,
        |candidate, _| surface.measure_rendered_width(node, candidate),
        scale,
    );

    for (i, line) in layout.lines().iter().filter(|l| !l.is_empty()).enumerate() {
        let dy = if i == 0 {
            font_px
        } else {
            font_px * options.line_height
        };
        let row = surface.create_line_element();
        surface.append_child(node, row)?;
        surface.set_attribute(row, "x", &x)?;
        surface.set_attribute(row, "dy", &fmt_num(dy.0))?;
        surface.set_text_content(row, &line.text())?;
    }

    Ok(layout)
}
