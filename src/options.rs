//! Label and rectangle styling options

use std::collections::BTreeMap;

use crate::defaults;
use crate::types::{Px, Zoom};

/// How a label is drawn
#[derive(Debug, Clone, PartialEq)]
pub struct LabelOptions {
    pub fill_color: String,
    /// Extra attributes copied onto the text element, applied after the
    /// built-in ones so they can override them
    pub attributes: BTreeMap<String, String>,
    /// Render beneath the rectangle instead of on top of it
    pub below: bool,
    /// Font size at `reference_zoom`
    pub font_size: Px,
    pub reference_zoom: Zoom,
    /// Baseline-to-baseline distance, in multiples of the font size
    pub line_height: f64,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            fill_color: defaults::FILL_COLOR.to_string(),
            attributes: BTreeMap::new(),
            below: false,
            font_size: defaults::FONT_SIZE,
            reference_zoom: defaults::REFERENCE_ZOOM,
            line_height: defaults::LINE_HEIGHT,
        }
    }
}

impl LabelOptions {
    pub fn with_fill_color(mut self, color: impl Into<String>) -> Self {
        self.fill_color = color.into();
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_below(mut self, below: bool) -> Self {
        self.below = below;
        self
    }

    pub fn with_font_size(mut self, font_size: Px) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_reference_zoom(mut self, zoom: Zoom) -> Self {
        self.reference_zoom = zoom;
        self
    }

    pub fn with_line_height(mut self, line_height: f64) -> Self {
        self.line_height = line_height;
        self
    }
}

/// How a rectangle's own outline is drawn
#[derive(Debug, Clone, PartialEq)]
pub struct RectangleStyle {
    pub stroke: String,
    pub stroke_width: Px,
    pub fill: String,
    pub fill_opacity: f64,
    /// Marks the rectangle (and its label) as a pointer target
    pub interactive: bool,
}

impl Default for RectangleStyle {
    fn default() -> Self {
        Self {
            stroke: defaults::STROKE_COLOR.to_string(),
            stroke_width: defaults::STROKE_WIDTH,
            fill: defaults::STROKE_COLOR.to_string(),
            fill_opacity: defaults::FILL_OPACITY,
            interactive: true,
        }
    }
}

impl RectangleStyle {
    pub fn with_stroke(mut self, color: impl Into<String>, width: Px) -> Self {
        self.stroke = color.into();
        self.stroke_width = width;
        self
    }

    pub fn with_fill(mut self, color: impl Into<String>, opacity: f64) -> Self {
        self.fill = color.into();
        self.fill_opacity = opacity;
        self
    }

    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }
}
