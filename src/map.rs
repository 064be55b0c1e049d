//! A map: one view, one surface, and the layers drawn on it.

use std::fmt;

use crate::layer::{Layer, MapLayer};
use crate::options::LabelOptions;
use crate::surface::{RenderSurface, SvgSurface};
use crate::types::{LatLng, LatLngBounds, Zoom};
use crate::view::{MapView, ViewContext};

/// Handle to a layer added to a [`Map`]. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer {}", self.0)
    }
}

/// Owns the view and the surface, and drives every layer's lifecycle hooks
/// as layers come and go and the view moves.
#[derive(Debug)]
pub struct Map<S> {
    view: MapView,
    surface: S,
    layers: Vec<(LayerId, MapLayer)>,
    next_id: u64,
}

impl<S: RenderSurface> Map<S> {
    pub fn new(view: MapView, surface: S) -> Self {
        Self {
            view,
            surface,
            layers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn view(&self) -> &MapView {
        &self.view
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn layer(&self, id: LayerId) -> Option<&MapLayer> {
        self.layers.iter().find(|(lid, _)| *lid == id).map(|(_, layer)| layer)
    }

    /// Layers in the order they were added
    pub fn layers(&self) -> impl Iterator<Item = (LayerId, &MapLayer)> {
        self.layers.iter().map(|(id, layer)| (*id, layer))
    }

    /// Add a layer and draw it
    pub fn add_layer(&mut self, layer: impl Into<MapLayer>) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;

        let mut layer = layer.into();
        layer.on_add(&mut ViewContext::new(&self.view, &mut self.surface));
        self.layers.push((id, layer));
        crate::log::debug!(%id, "layer added");
        id
    }

    /// Take a layer off the map, releasing everything it drew
    pub fn remove_layer(&mut self, id: LayerId) -> Option<MapLayer> {
        let index = self.layers.iter().position(|(lid, _)| *lid == id)?;
        let (_, mut layer) = self.layers.remove(index);
        layer.on_remove(&mut ViewContext::new(&self.view, &mut self.surface));
        crate::log::debug!(%id, "layer removed");
        Some(layer)
    }

    /// Set the label of a layer. Returns `false` if there is no such layer
    /// or it cannot carry a label.
    pub fn set_text(
        &mut self,
        id: LayerId,
        text: Option<&str>,
        options: Option<LabelOptions>,
    ) -> bool {
        self.with_layer(id, |layer, view| match layer.as_labelable() {
            Some(labelable) => {
                labelable.set_text(text, options, Some(view));
                true
            }
            None => false,
        })
        .unwrap_or(false)
    }

    /// Add a member to a group already on the map, drawing it. Returns the
    /// member's index, or `None` if `group` is not a group.
    pub fn add_to_group(
        &mut self,
        group: LayerId,
        layer: impl Into<MapLayer>,
    ) -> Option<usize> {
        let layer = layer.into();
        self.with_layer(group, |target, view| match target {
            MapLayer::LayerGroup(members) => Some(members.add_layer(layer, view)),
            _ => None,
        })
        .flatten()
    }

    /// Take a member out of a group on the map, releasing what it drew
    pub fn remove_from_group(&mut self, group: LayerId, index: usize) -> Option<MapLayer> {
        self.with_layer(group, |target, view| match target {
            MapLayer::LayerGroup(members) => members.remove_layer(index, view),
            _ => None,
        })
        .flatten()
    }

    /// Move a text box. Returns `false` if `id` is not a text box.
    pub fn set_bounds(&mut self, id: LayerId, bounds: LatLngBounds) -> bool {
        self.with_layer(id, |layer, view| match layer {
            MapLayer::TextBox(text_box) => {
                text_box.set_bounds(bounds, Some(view));
                true
            }
            _ => false,
        })
        .unwrap_or(false)
    }

    pub fn bring_to_front(&mut self, id: LayerId) -> bool {
        self.with_layer(id, |layer, view| layer.bring_to_front(view)).is_some()
    }

    pub fn set_zoom(&mut self, zoom: Zoom) {
        self.view.set_zoom(zoom);
        self.update_paths();
    }

    pub fn set_center(&mut self, center: LatLng) {
        self.view.set_center(center);
        self.update_paths();
    }

    /// Pan by a screen offset in pixels
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.view.pan_by(dx, dy);
        self.update_paths();
    }

    fn update_paths(&mut self) {
        let mut view = ViewContext::new(&self.view, &mut self.surface);
        for (_, layer) in &mut self.layers {
            layer.update_path(&mut view);
        }
    }

    fn with_layer<R>(
        &mut self,
        id: LayerId,
        f: impl FnOnce(&mut MapLayer, &mut ViewContext<'_>) -> R,
    ) -> Option<R> {
        let (_, layer) = self.layers.iter_mut().find(|(lid, _)| *lid == id)?;
        let mut view = ViewContext::new(&self.view, &mut self.surface);
        Some(f(layer, &mut view))
    }
}

impl Map<SvgSurface> {
    /// Serialize the current drawing
    pub fn to_svg_string(&self) -> String {
        self.surface.to_svg_string()
    }
}
