//! Map layers: lifecycle hooks, the label capability, and groups.

use enum_dispatch::enum_dispatch;

use crate::options::LabelOptions;
use crate::shapes::{CircleMarker, TextBox};
use crate::view::ViewContext;

/// Lifecycle hooks a view drives on everything added to it
#[enum_dispatch]
pub trait Layer {
    /// Added to a view: create visuals
    fn on_add(&mut self, view: &mut ViewContext<'_>);

    /// Removed from a view: release every visual
    fn on_remove(&mut self, view: &mut ViewContext<'_>);

    /// The projection changed (pan, zoom) or the geometry did
    fn update_path(&mut self, view: &mut ViewContext<'_>);

    fn bring_to_front(&mut self, view: &mut ViewContext<'_>);

    /// The label capability, for layers that have it
    fn as_labelable(&mut self) -> Option<&mut dyn Labelable> {
        None
    }
}

/// Something that can carry a text label
pub trait Labelable {
    /// Store the text and options; render now if attached to `view`.
    /// `None` text clears the label.
    fn set_text(
        &mut self,
        text: Option<&str>,
        options: Option<LabelOptions>,
        view: Option<&mut ViewContext<'_>>,
    );
}

/// Every kind of layer a map holds
#[enum_dispatch(Layer)]
#[derive(Debug, Clone)]
pub enum MapLayer {
    TextBox,
    CircleMarker,
    LayerGroup,
}

/// An ordered collection of layers added and removed as one
#[derive(Debug, Clone, Default)]
pub struct LayerGroup {
    layers: Vec<MapLayer>,
    attached: bool,
}

impl LayerGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layers<I, L>(layers: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<MapLayer>,
    {
        Self {
            layers: layers.into_iter().map(Into::into).collect(),
            attached: false,
        }
    }

    pub fn layers(&self) -> &[MapLayer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Append a layer, drawing it on `view` if the group is on it
    pub fn add_layer(&mut self, layer: impl Into<MapLayer>, view: &mut ViewContext<'_>) -> usize {
        let mut layer = layer.into();
        if self.attached {
            layer.on_add(view);
        }
        self.layers.push(layer);
        self.layers.len() - 1
    }

    /// Take a member out, releasing its visuals from `view` if the group is
    /// on it
    pub fn remove_layer(
        &mut self,
        index: usize,
        view: &mut ViewContext<'_>,
    ) -> Option<MapLayer> {
        if index >= self.layers.len() {
            return None;
        }
        let mut layer = self.layers.remove(index);
        if self.attached {
            layer.on_remove(view);
        }
        Some(layer)
    }
}

impl Layer for LayerGroup {
    fn on_add(&mut self, view: &mut ViewContext<'_>) {
        self.attached = true;
        for layer in &mut self.layers {
            layer.on_add(view);
        }
    }

    fn on_remove(&mut self, view: &mut ViewContext<'_>) {
        for layer in &mut self.layers {
            layer.on_remove(view);
        }
        self.attached = false;
    }

    fn update_path(&mut self, view: &mut ViewContext<'_>) {
        for layer in &mut self.layers {
            layer.update_path(view);
        }
    }

    fn bring_to_front(&mut self, view: &mut ViewContext<'_>) {
        for layer in &mut self.layers {
            layer.bring_to_front(view);
        }
    }

    fn as_labelable(&mut self) -> Option<&mut dyn Labelable> {
        Some(self)
    }
}

impl Labelable for LayerGroup {
    /// Forward to every member that can carry a label; skip the rest
    fn set_text(
        &mut self,
        text: Option<&str>,
        options: Option<LabelOptions>,
        mut view: Option<&mut ViewContext<'_>>,
    ) {
        for layer in &mut self.layers {
            if let Some(labelable) = layer.as_labelable() {
                labelable.set_text(text, options.clone(), view.as_deref_mut());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::MonospaceMetrics;
    use crate::surface::{ElementKind, RenderSurface, SvgSurface};
    use crate::types::{LatLng, LatLngBounds, Px, Zoom};
    use crate::view::MapView;

    fn bounds(lat: f64, lng: f64) -> LatLngBounds {
        LatLngBounds::new(LatLng::new(lat, lng), LatLng::new(lat + 0.01, lng + 0.02))
    }

    fn group() -> LayerGroup {
        LayerGroup::with_layers([
            MapLayer::from(TextBox::new(bounds(0.0, 0.0))),
            MapLayer::from(CircleMarker::new(LatLng::new(0.0, 0.0), Px(5.0))),
            MapLayer::from(TextBox::new(bounds(0.02, 0.0))),
        ])
    }

    fn labels(group: &LayerGroup) -> Vec<Option<String>> {
        group
            .layers()
            .iter()
            .filter_map(|l| match l {
                MapLayer::TextBox(tb) => Some(tb.text().map(str::to_owned)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn set_text_reaches_every_labelable_member() {
        let mut group = group();
        group.set_text(Some("Field"), None, None);
        assert_eq!(labels(&group), vec![Some("Field".into()), Some("Field".into())]);
    }

    #[test]
    fn markers_have_no_label_capability() {
        let mut marker = MapLayer::from(CircleMarker::new(LatLng::new(0.0, 0.0), Px(5.0)));
        assert!(marker.as_labelable().is_none());
        let mut text_box = MapLayer::from(TextBox::new(bounds(0.0, 0.0)));
        assert!(text_box.as_labelable().is_some());
    }

    #[test]
    fn nested_groups_forward() {
        let mut outer = LayerGroup::with_layers([MapLayer::from(group())]);
        outer.set_text(Some("Deep"), None, None);
        let MapLayer::LayerGroup(inner) = &outer.layers()[0] else {
            panic!("expected a group");
        };
        assert_eq!(labels(inner), vec![Some("Deep".into()), Some("Deep".into())]);
    }

    #[test]
    fn attached_group_renders_and_releases() {
        let view = MapView::new(LatLng::new(0.01, 0.01), Zoom(13.0), 800.0, 600.0);
        let mut surface = SvgSurface::new(800.0, 600.0).with_metrics(MonospaceMetrics::default());
        let mut group = group();
        {
            let mut ctx = ViewContext::new(&view, &mut surface);
            group.on_add(&mut ctx);
            group.set_text(Some("Plot"), None, Some(&mut ctx));
        }
        assert_eq!(surface.find_all(ElementKind::Text).len(), 2);
        assert_eq!(surface.find_all(ElementKind::Rect).len(), 2);
        assert_eq!(surface.find_all(ElementKind::Circle).len(), 1);

        {
            let mut ctx = ViewContext::new(&view, &mut surface);
            let removed = group.remove_layer(0, &mut ctx);
            assert!(removed.is_some());
        }
        assert_eq!(surface.find_all(ElementKind::Text).len(), 1);

        {
            let mut ctx = ViewContext::new(&view, &mut surface);
            group.on_remove(&mut ctx);
        }
        assert_eq!(surface.children(surface.root()).len(), 0);
        assert_eq!(surface.live_nodes(), 1);
    }

    #[test]
    fn adding_to_attached_group_draws_member() {
        let view = MapView::new(LatLng::new(0.0, 0.0), Zoom(13.0), 800.0, 600.0);
        let mut surface = SvgSurface::new(800.0, 600.0);
        let mut group = LayerGroup::new();
        let mut ctx = ViewContext::new(&view, &mut surface);
        group.on_add(&mut ctx);

        let mut text_box = TextBox::new(bounds(0.0, 0.0));
        text_box.set_text(Some("Late"), None, None);
        let index = group.add_layer(text_box, &mut ctx);
        drop(ctx);

        assert_eq!(index, 0);
        assert_eq!(group.len(), 1);
        assert_eq!(surface.find_all(ElementKind::Text).len(), 1);
    }

    #[test]
    fn removing_from_attached_group_releases_member_nodes() {
        let view = MapView::new(LatLng::new(0.0, 0.0), Zoom(13.0), 800.0, 600.0);
        let mut surface = SvgSurface::new(800.0, 600.0);
        let mut text_box = TextBox::new(bounds(0.0, 0.0));
        text_box.set_text(Some("Leaving"), None, None);
        let mut group = LayerGroup::with_layers([text_box]);

        let mut ctx = ViewContext::new(&view, &mut surface);
        group.on_add(&mut ctx);
        let removed = group.remove_layer(0, &mut ctx);
        assert!(group.remove_layer(0, &mut ctx).is_none());
        drop(ctx);

        let Some(MapLayer::TextBox(text_box)) = removed else {
            panic!("expected the text box back");
        };
        assert!(!text_box.label().is_rendered());
        assert!(!text_box.rectangle().is_attached());
        assert!(group.is_empty());
        assert!(surface.children(surface.root()).is_empty());
        assert_eq!(surface.live_nodes(), 1);
    }

    #[test]
    fn detached_group_membership_draws_nothing() {
        let view = MapView::new(LatLng::new(0.0, 0.0), Zoom(13.0), 800.0, 600.0);
        let mut surface = SvgSurface::new(800.0, 600.0);
        let mut group = LayerGroup::new();
        let mut ctx = ViewContext::new(&view, &mut surface);
        group.add_layer(TextBox::new(bounds(0.0, 0.0)), &mut ctx);
        drop(ctx);
        assert_eq!(group.len(), 1);
        assert_eq!(surface.live_nodes(), 1);
    }
}
