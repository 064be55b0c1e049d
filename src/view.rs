//! The map viewport: geographic → screen projection at the current pan/zoom.

use std::f64::consts::{FRAC_PI_4, PI};

use glam::{DVec2, dvec2};

use crate::defaults;
use crate::errors::ViewError;
use crate::surface::RenderSurface;
use crate::types::{LatLng, ScreenPoint, Zoom};

/// Maps geographic coordinates to screen pixels for the view's current
/// pan and zoom
pub trait Projection {
    fn lat_lng_to_screen_point(&self, at: LatLng) -> ScreenPoint;

    fn zoom(&self) -> Zoom;
}

/// What a layer needs while it is on a view: where things are, and where
/// to draw them
pub struct ViewContext<'a> {
    pub projection: &'a dyn Projection,
    pub surface: &'a mut dyn RenderSurface,
}

impl<'a> ViewContext<'a> {
    pub fn new(projection: &'a dyn Projection, surface: &'a mut dyn RenderSurface) -> Self {
        Self {
            projection,
            surface,
        }
    }
}

/// A spherical Web-Mercator viewport
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    center: LatLng,
    zoom: Zoom,
    size: DVec2,
}

impl MapView {
    /// Create a view (unchecked). Use `try_new` for user-provided values.
    pub fn new(center: LatLng, zoom: Zoom, width: f64, height: f64) -> Self {
        Self {
            center,
            zoom,
            size: dvec2(width, height),
        }
    }

    /// Create a view, rejecting non-finite coordinates and empty viewports
    pub fn try_new(center: LatLng, zoom: f64, width: f64, height: f64) -> Result<Self, ViewError> {
        let center = LatLng::try_new(center.lat, center.lng).map_err(ViewError::field("center"))?;
        let zoom = Zoom::try_new(zoom).map_err(ViewError::field("zoom"))?;
        if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
            return Err(ViewError::InvalidSize { width, height });
        }
        Ok(Self::new(center, zoom, width, height))
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn size(&self) -> DVec2 {
        self.size
    }

    pub fn set_zoom(&mut self, zoom: Zoom) {
        self.zoom = zoom;
    }

    pub fn set_center(&mut self, center: LatLng) {
        self.center = center;
    }

    /// Shift the view by a screen-space offset in pixels
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        let moved = self.project(self.center) + dvec2(dx, dy);
        self.center = self.unproject(moved);
    }

    fn world_size(&self) -> f64 {
        defaults::TILE_SIZE * 2f64.powf(self.zoom.0)
    }

    /// Absolute pixel position of `at` in the world at the current zoom
    pub fn project(&self, at: LatLng) -> DVec2 {
        let world = self.world_size();
        let lat = at
            .lat
            .clamp(-defaults::MAX_LATITUDE, defaults::MAX_LATITUDE)
            .to_radians();
        let x = (at.lng + 180.0) / 360.0;
        let y = 0.5 - (FRAC_PI_4 + lat / 2.0).tan().ln() / (2.0 * PI);
        dvec2(x, y) * world
    }

    /// Inverse of [`project`](Self::project)
    pub fn unproject(&self, point: DVec2) -> LatLng {
        let unit = point / self.world_size();
        let lng = unit.x * 360.0 - 180.0;
        let lat = (2.0 * ((0.5 - unit.y) * 2.0 * PI).exp().atan() - PI / 2.0).to_degrees();
        LatLng::new(lat, lng)
    }
}

impl Projection for MapView {
    fn lat_lng_to_screen_point(&self, at: LatLng) -> ScreenPoint {
        self.project(at) - self.project(self.center) + self.size / 2.0
    }

    fn zoom(&self) -> Zoom {
        self.zoom
    }
}
