//! Strongly-typed numeric primitives for textbox (zero-cost newtypes).
//!
//! Screen-space quantities are `Px`, zoom levels are `Zoom`, font
//! multipliers are `Scale`. Geographic input is validated once, at the
//! `LatLng` constructor.

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use glam::DVec2;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is outside the accepted range
    OutOfRange,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::OutOfRange => write!(f, "value is out of range"),
        }
    }
}

impl std::error::Error for NumericError {}

fn check_finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

/// A position in screen space, in pixels, origin at the viewport's top-left.
pub type ScreenPoint = DVec2;

/// Screen pixels
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Px(pub f64);

impl Px {
    pub const ZERO: Px = Px(0.0);

    /// Get the raw value
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    /// A width that cannot hold anything: zero, negative or NaN.
    #[inline]
    pub fn is_degenerate(self) -> bool {
        !(self.0 > 0.0)
    }
}

impl Add for Px {
    type Output = Px;
    fn add(self, rhs: Px) -> Px { Px(self.0 + rhs.0) }
}
impl Sub for Px {
    type Output = Px;
    fn sub(self, rhs: Px) -> Px { Px(self.0 - rhs.0) }
}
impl Mul<f64> for Px {
    type Output = Px;
    fn mul(self, rhs: f64) -> Px { Px(self.0 * rhs) }
}
impl Div<f64> for Px {
    type Output = Px;
    fn div(self, rhs: f64) -> Px { Px(self.0 / rhs) }
}

impl fmt::Display for Px {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}

/// Zoom level of a map view (fractional zoom is allowed)
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Zoom(pub f64);

impl Zoom {
    /// Create a Zoom with validation (rejects NaN/infinite)
    pub fn try_new(val: f64) -> Result<Zoom, NumericError> {
        check_finite(val).map(Zoom)
    }

    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Zoom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "z{}", self.0)
    }
}

/// Unitless font multiplier
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Scale(pub f64);

impl Scale {
    pub const ONE: Scale = Scale(1.0);

    /// `2^(zoom - reference)`: text doubles in size with every zoom level,
    /// the same way projected geometry does.
    pub fn from_zoom(zoom: Zoom, reference: Zoom) -> Scale {
        Scale(2f64.powf(zoom.0 - reference.0))
    }

    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }
}

impl Default for Scale {
    fn default() -> Self {
        Scale::ONE
    }
}

/// Scale * Px = Px
impl Mul<Px> for Scale {
    type Output = Px;
    fn mul(self, rhs: Px) -> Px {
        Px(self.0 * rhs.0)
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// A geographic coordinate in degrees
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Create a coordinate (unchecked, const-friendly).
    /// Use `try_new` for user-provided values.
    pub const fn new(lat: f64, lng: f64) -> LatLng {
        LatLng { lat, lng }
    }

    /// Create a coordinate with validation: both parts finite, latitude
    /// within ±90.
    pub fn try_new(lat: f64, lng: f64) -> Result<LatLng, NumericError> {
        let lat = check_finite(lat)?;
        let lng = check_finite(lng)?;
        if !(-90.0..=90.0).contains(&lat) {
            return Err(NumericError::OutOfRange);
        }
        Ok(LatLng { lat, lng })
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

/// Geographic bounds of a rectangle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    /// Bounds spanning two opposite corners, in any order.
    pub fn new(a: LatLng, b: LatLng) -> Self {
        LatLngBounds {
            south_west: LatLng::new(a.lat.min(b.lat), a.lng.min(b.lng)),
            north_east: LatLng::new(a.lat.max(b.lat), a.lng.max(b.lng)),
        }
    }

    pub fn north_west(&self) -> LatLng {
        LatLng::new(self.north_east.lat, self.south_west.lng)
    }

    pub fn south_east(&self) -> LatLng {
        LatLng::new(self.south_west.lat, self.north_east.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Px tests ====================

    #[test]
    fn px_degenerate_widths() {
        assert!(Px(0.0).is_degenerate());
        assert!(Px(-3.0).is_degenerate());
        assert!(Px(f64::NAN).is_degenerate());
        assert!(!Px(0.5).is_degenerate());
    }

    #[test]
    fn px_arithmetic() {
        assert_eq!(Px(3.0) + Px(2.0), Px(5.0));
        assert_eq!(Px(3.0) - Px(2.0), Px(1.0));
        assert_eq!(Px(3.0) * 2.0, Px(6.0));
        assert_eq!(Px(3.0) / 2.0, Px(1.5));
        assert_eq!(Scale(4.0) * Px(2.5), Px(10.0));
    }

    // ==================== Scale tests ====================

    #[test]
    fn scale_is_one_at_reference_zoom() {
        assert_eq!(Scale::from_zoom(Zoom(13.0), Zoom(13.0)), Scale::ONE);
    }

    #[test]
    fn scale_doubles_per_zoom_level() {
        assert_eq!(Scale::from_zoom(Zoom(15.0), Zoom(13.0)), Scale(4.0));
        assert_eq!(Scale::from_zoom(Zoom(12.0), Zoom(13.0)), Scale(0.5));
    }

    #[test]
    fn zoom_try_new_rejects_non_finite() {
        assert_eq!(Zoom::try_new(f64::NAN), Err(NumericError::NaN));
        assert_eq!(Zoom::try_new(f64::INFINITY), Err(NumericError::Infinite));
        assert_eq!(Zoom::try_new(3.5), Ok(Zoom(3.5)));
    }

    // ==================== LatLng tests ====================

    #[test]
    fn latlng_try_new_validates() {
        assert!(LatLng::try_new(51.5, -0.1).is_ok());
        assert_eq!(LatLng::try_new(91.0, 0.0), Err(NumericError::OutOfRange));
        assert_eq!(LatLng::try_new(0.0, f64::NAN), Err(NumericError::NaN));
    }

    // ==================== LatLngBounds tests ====================

    #[test]
    fn bounds_normalize_corners() {
        let b = LatLngBounds::new(LatLng::new(10.0, 20.0), LatLng::new(5.0, 25.0));
        assert_eq!(b.south_west, LatLng::new(5.0, 20.0));
        assert_eq!(b.north_east, LatLng::new(10.0, 25.0));
        assert_eq!(b.north_west(), LatLng::new(10.0, 20.0));
        assert_eq!(b.south_east(), LatLng::new(5.0, 25.0));
    }
}
