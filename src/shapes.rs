//! Shapes that live on a map view
//!
//! Each shape owns the surface node it draws and knows how to:
//! - Create that node when added to a view
//! - Re-project it when the view pans or zooms
//! - Release it when removed

use crate::errors::SurfaceError;
use crate::label::{Host, INTERACTIVE_CLASS, Label};
use crate::layer::{Labelable, Layer};
use crate::options::{LabelOptions, RectangleStyle};
use crate::surface::{NodeId, RenderSurface, fmt_num};
use crate::types::{LatLng, LatLngBounds, Px};
use crate::view::ViewContext;

/// Stroke and fill attributes shared by every outlined shape
fn apply_style(
    surface: &mut dyn RenderSurface,
    node: NodeId,
    style: &RectangleStyle,
) -> Result<(), SurfaceError> {
    surface.set_attribute(node, "stroke", &style.stroke)?;
    surface.set_attribute(node, "stroke-width", &fmt_num(style.stroke_width.0))?;
    surface.set_attribute(node, "fill", &style.fill)?;
    surface.set_attribute(node, "fill-opacity", &fmt_num(style.fill_opacity))?;
    if style.interactive {
        surface.set_attribute(node, "class", INTERACTIVE_CLASS)?;
    }
    Ok(())
}

/// Put a freshly created node on the root and draw it, releasing it again if
/// drawing fails
fn attach_new(
    node: NodeId,
    view: &mut ViewContext<'_>,
    draw: impl FnOnce(NodeId, &mut ViewContext<'_>) -> Result<(), SurfaceError>,
) -> Option<NodeId> {
    let root = view.surface.root();
    let attached = view
        .surface
        .append_child(root, node)
        .and_then(|()| draw(node, view));
    match attached {
        Ok(()) => Some(node),
        Err(err) => {
            crate::log::warn!(error = %err, "shape could not be drawn");
            if let Err(cleanup) = view.surface.remove_child(root, node) {
                crate::log::warn!(
                    error = %cleanup,
                    node = %node,
                    "partial shape node left behind"
                );
            }
            None
        }
    }
}

fn release(node: Option<NodeId>, view: &mut ViewContext<'_>) {
    let Some(node) = node else {
        return;
    };
    let surface = &mut *view.surface;
    let parent = surface.parent_of(node).unwrap_or_else(|| surface.root());
    if let Err(err) = surface.remove_child(parent, node) {
        crate::log::warn!(error = %err, node = %node, "shape node was already gone");
    }
}

fn raise(node: Option<NodeId>, view: &mut ViewContext<'_>) {
    let Some(node) = node else {
        return;
    };
    let root = view.surface.root();
    if let Err(err) = view.surface.append_child(root, node) {
        crate::log::warn!(error = %err, node = %node, "shape could not be raised");
    }
}

// ============================================================================
// Rectangle
// ============================================================================

/// A geographic rectangle drawn as a `rect` element
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    bounds: LatLngBounds,
    style: RectangleStyle,
    node: Option<NodeId>,
}

impl Rectangle {
    pub fn new(bounds: LatLngBounds) -> Self {
        Self::with_style(bounds, RectangleStyle::default())
    }

    pub fn with_style(bounds: LatLngBounds, style: RectangleStyle) -> Self {
        Self {
            bounds,
            style,
            node: None,
        }
    }

    pub fn bounds(&self) -> LatLngBounds {
        self.bounds
    }

    pub fn style(&self) -> &RectangleStyle {
        &self.style
    }

    /// The drawn `rect`, present while on a view
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    pub fn is_attached(&self) -> bool {
        self.node.is_some()
    }

    /// Replace the geometry. Call [`update_path`](Self::update_path) to
    /// redraw.
    pub fn set_bounds(&mut self, bounds: LatLngBounds) {
        self.bounds = bounds;
    }

    /// What a label on this rectangle needs to know about it
    pub fn host(&self) -> Host {
        Host {
            bounds: self.bounds,
            node: self.node,
            interactive: self.style.interactive,
        }
    }

    pub fn on_add(&mut self, view: &mut ViewContext<'_>) {
        if self.node.is_some() {
            return;
        }
        let node = view.surface.create_rect_element();
        self.node = attach_new(node, view, |node, view| {
            self.draw(node, view)?;
            apply_style(view.surface, node, &self.style)
        });
    }

    pub fn on_remove(&mut self, view: &mut ViewContext<'_>) {
        release(self.node.take(), view);
    }

    pub fn update_path(&mut self, view: &mut ViewContext<'_>) {
        let Some(node) = self.node else {
            return;
        };
        if let Err(err) = self.draw(node, view) {
            crate::log::warn!(error = %err, node = %node, "rectangle could not be updated");
        }
    }

    pub fn bring_to_front(&mut self, view: &mut ViewContext<'_>) {
        raise(self.node, view);
    }

    /// Position and size from the current projection
    fn draw(&self, node: NodeId, view: &mut ViewContext<'_>) -> Result<(), SurfaceError> {
        let north_west = view.projection.lat_lng_to_screen_point(self.bounds.north_west());
        let south_east = view.projection.lat_lng_to_screen_point(self.bounds.south_east());
        let size = south_east - north_west;
        let surface = &mut *view.surface;
        surface.set_attribute(node, "x", &fmt_num(north_west.x))?;
        surface.set_attribute(node, "y", &fmt_num(north_west.y))?;
        surface.set_attribute(node, "width", &fmt_num(size.x))?;
        surface.set_attribute(node, "height", &fmt_num(size.y))?;
        Ok(())
    }
}

// ============================================================================
// TextBox
// ============================================================================

/// A rectangle with a wrapped text label inside it
#[derive(Debug, Clone)]
pub struct TextBox {
    rectangle: Rectangle,
    label: Label,
}

impl TextBox {
    pub fn new(bounds: LatLngBounds) -> Self {
        Self::from_rectangle(Rectangle::new(bounds))
    }

    pub fn with_style(bounds: LatLngBounds, style: RectangleStyle) -> Self {
        Self::from_rectangle(Rectangle::with_style(bounds, style))
    }

    pub fn from_rectangle(rectangle: Rectangle) -> Self {
        Self {
            rectangle,
            label: Label::new(),
        }
    }

    pub fn rectangle(&self) -> &Rectangle {
        &self.rectangle
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn bounds(&self) -> LatLngBounds {
        self.rectangle.bounds()
    }

    pub fn text(&self) -> Option<&str> {
        self.label.text()
    }

    /// Replace the geometry, redrawing rectangle and label when `view` is
    /// the view this box is on
    pub fn set_bounds(&mut self, bounds: LatLngBounds, view: Option<&mut ViewContext<'_>>) {
        self.rectangle.set_bounds(bounds);
        if let Some(view) = view {
            self.update_path(view);
        }
    }
}

impl Layer for TextBox {
    fn on_add(&mut self, view: &mut ViewContext<'_>) {
        self.rectangle.on_add(view);
        self.label.attach_to_view(&self.rectangle.host(), view);
    }

    fn on_remove(&mut self, view: &mut ViewContext<'_>) {
        self.label.detach_from_view(view);
        self.rectangle.on_remove(view);
    }

    fn update_path(&mut self, view: &mut ViewContext<'_>) {
        self.rectangle.update_path(view);
        self.label.redraw(&self.rectangle.host(), Some(view));
    }

    fn bring_to_front(&mut self, view: &mut ViewContext<'_>) {
        self.rectangle.bring_to_front(view);
        self.label.redraw(&self.rectangle.host(), Some(view));
    }

    fn as_labelable(&mut self) -> Option<&mut dyn Labelable> {
        Some(self)
    }
}

impl Labelable for TextBox {
    fn set_text(
        &mut self,
        text: Option<&str>,
        options: Option<LabelOptions>,
        view: Option<&mut ViewContext<'_>>,
    ) {
        let host = self.rectangle.host();
        self.label.set_text(text, options, &host, view);
    }
}

// ============================================================================
// CircleMarker
// ============================================================================

/// A fixed-radius point marker. Carries no label.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleMarker {
    center: LatLng,
    radius: Px,
    style: RectangleStyle,
    node: Option<NodeId>,
}

impl CircleMarker {
    pub fn new(center: LatLng, radius: Px) -> Self {
        Self {
            center,
            radius,
            style: RectangleStyle::default(),
            node: None,
        }
    }

    pub fn with_style(mut self, style: RectangleStyle) -> Self {
        self.style = style;
        self
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn radius(&self) -> Px {
        self.radius
    }

    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    fn draw(&self, node: NodeId, view: &mut ViewContext<'_>) -> Result<(), SurfaceError> {
        let at = view.projection.lat_lng_to_screen_point(self.center);
        let surface = &mut *view.surface;
        surface.set_attribute(node, "cx", &fmt_num(at.x))?;
        surface.set_attribute(node, "cy", &fmt_num(at.y))?;
        surface.set_attribute(node, "r", &fmt_num(self.radius.0))?;
        Ok(())
    }
}

impl Layer for CircleMarker {
    fn on_add(&mut self, view: &mut ViewContext<'_>) {
        if self.node.is_some() {
            return;
        }
        let node = view.surface.create_circle_element();
        self.node = attach_new(node, view, |node, view| {
            self.draw(node, view)?;
            apply_style(view.surface, node, &self.style)
        });
    }

    fn on_remove(&mut self, view: &mut ViewContext<'_>) {
        release(self.node.take(), view);
    }

    fn update_path(&mut self, view: &mut ViewContext<'_>) {
        let Some(node) = self.node else {
            return;
        };
        if let Err(err) = self.draw(node, view) {
            crate::log::warn!(error = %err, node = %node, "marker could not be updated");
        }
    }

    fn bring_to_front(&mut self, view: &mut ViewContext<'_>) {
        raise(self.node, view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::MonospaceMetrics;
    use crate::surface::{ElementKind, SvgSurface};
    use crate::types::Zoom;
    use crate::view::MapView;

    fn view() -> MapView {
        MapView::new(LatLng::new(0.0, 0.0), Zoom(13.0), 1000.0, 1000.0)
    }

    fn surface() -> SvgSurface {
        SvgSurface::new(1000.0, 1000.0).with_metrics(MonospaceMetrics::default())
    }

    fn bounds() -> LatLngBounds {
        LatLngBounds::new(LatLng::new(0.0, 0.0), LatLng::new(0.01, 0.02))
    }

    #[test]
    fn rectangle_draws_projected_box() {
        let view = view();
        let mut surface = surface();
        let mut rect = Rectangle::new(bounds());
        rect.on_add(&mut ViewContext::new(&view, &mut surface));

        let node = rect.node().unwrap();
        assert_eq!(surface.kind(node), Some(ElementKind::Rect));
        // 0.02° of longitude at zoom 13 is 2^21 * 0.02 / 360 px
        let width: f64 = surface.attribute(node, "width").unwrap().parse().unwrap();
        assert!((width - 116.508).abs() < 0.01, "{width}");
        assert_eq!(surface.attribute(node, "x"), Some("500"));
        let y: f64 = surface.attribute(node, "y").unwrap().parse().unwrap();
        assert!(y < 500.0, "north edge should sit above the equator: {y}");
        assert_eq!(surface.attribute(node, "class"), Some(INTERACTIVE_CLASS));
    }

    #[test]
    fn rectangle_add_is_idempotent_and_remove_releases() {
        let view = view();
        let mut surface = surface();
        let mut rect = Rectangle::new(bounds());
        let mut ctx = ViewContext::new(&view, &mut surface);
        rect.on_add(&mut ctx);
        rect.on_add(&mut ctx);
        rect.on_remove(&mut ctx);
        rect.on_remove(&mut ctx);
        drop(ctx);
        assert!(!rect.is_attached());
        assert_eq!(surface.live_nodes(), 1);
    }

    #[test]
    fn text_box_stores_text_until_added() {
        let view = view();
        let mut surface = surface();
        let mut text_box = TextBox::new(bounds());
        text_box.set_text(Some("Orchard"), None, None);
        assert!(!text_box.label().is_rendered());

        text_box.on_add(&mut ViewContext::new(&view, &mut surface));
        assert!(text_box.label().is_rendered());
        let root = surface.root();
        assert_eq!(
            surface.children(root),
            &[text_box.rectangle().node().unwrap(), text_box.label().node().unwrap()]
        );
    }

    #[test]
    fn text_box_remove_then_add_restores_label() {
        let view = view();
        let mut surface = surface();
        let mut text_box = TextBox::new(bounds());
        let mut ctx = ViewContext::new(&view, &mut surface);
        text_box.on_add(&mut ctx);
        text_box.set_text(Some("Orchard"), None, Some(&mut ctx));
        text_box.on_remove(&mut ctx);
        assert!(!text_box.label().is_rendered());
        assert_eq!(text_box.text(), Some("Orchard"));

        text_box.on_add(&mut ctx);
        drop(ctx);
        assert_eq!(surface.find_all(ElementKind::Text).len(), 1);
        assert_eq!(surface.find_all(ElementKind::Rect).len(), 1);
    }

    #[test]
    fn bring_to_front_keeps_label_above_rectangle() {
        let view = view();
        let mut surface = surface();
        let mut first = TextBox::new(bounds());
        let mut second = TextBox::new(bounds());
        let mut ctx = ViewContext::new(&view, &mut surface);
        first.on_add(&mut ctx);
        first.set_text(Some("One"), None, Some(&mut ctx));
        second.on_add(&mut ctx);
        first.bring_to_front(&mut ctx);
        drop(ctx);

        let root = surface.root();
        let order = surface.children(root);
        assert_eq!(order.len(), 3);
        assert_eq!(order[1], first.rectangle().node().unwrap());
        assert_eq!(order[2], first.label().node().unwrap());
    }

    #[test]
    fn set_bounds_moves_label() {
        let view = view();
        let mut surface = surface();
        let mut text_box = TextBox::new(bounds());
        let mut ctx = ViewContext::new(&view, &mut surface);
        text_box.on_add(&mut ctx);
        text_box.set_text(Some("Field"), None, Some(&mut ctx));
        let before = text_box.label().node().unwrap();

        let moved = LatLngBounds::new(LatLng::new(-0.01, -0.02), LatLng::new(0.0, 0.0));
        text_box.set_bounds(moved, Some(&mut ctx));
        drop(ctx);

        let after = text_box.label().node().unwrap();
        assert_ne!(before, after);
        assert!(!surface.contains(before));
        assert_eq!(surface.attribute(after, "y"), Some("500"));
    }

    #[test]
    fn circle_marker_draws_and_releases() {
        let view = view();
        let mut surface = surface();
        let mut marker = CircleMarker::new(LatLng::new(0.0, 0.0), Px(6.0));
        let mut ctx = ViewContext::new(&view, &mut surface);
        marker.on_add(&mut ctx);
        let node = marker.node().unwrap();
        assert_eq!(ctx.surface.parent_of(node), Some(ctx.surface.root()));
        marker.on_remove(&mut ctx);
        drop(ctx);
        assert_eq!(surface.live_nodes(), 1);
    }

    #[test]
    fn style_reaches_rectangle_and_label() {
        let view = view();
        let mut surface = surface();
        let style = RectangleStyle::default()
            .with_stroke("red", Px(1.5))
            .with_fill("yellow", 0.5)
            .with_interactive(false);
        let mut text_box = TextBox::with_style(bounds(), style);
        let mut ctx = ViewContext::new(&view, &mut surface);
        text_box.on_add(&mut ctx);
        text_box.set_text(Some("Quiet"), None, Some(&mut ctx));
        drop(ctx);

        let rect = text_box.rectangle().node().unwrap();
        let label = text_box.label().node().unwrap();
        assert_eq!(surface.attribute(rect, "stroke"), Some("red"));
        assert_eq!(surface.attribute(rect, "stroke-width"), Some("1.5"));
        assert_eq!(surface.attribute(rect, "fill"), Some("yellow"));
        assert_eq!(surface.attribute(rect, "fill-opacity"), Some("0.5"));
        assert_eq!(surface.attribute(rect, "class"), None);
        assert_eq!(surface.attribute(label, "class"), None);
    }
}
