//! Text measurement backends.
//!
//! Wrapping is driven by rendered width, never by character counts. A
//! surface owns one [`TextMetrics`] and consults it whenever a label asks
//! how wide a candidate line would render.

use crate::defaults;
use crate::types::Px;

/// Width of a string rendered at a given font size
pub trait TextMetrics {
    fn width(&self, text: &str, font_size: Px) -> Px;
}

/// Proportional glyph advances for printable ASCII, in hundredths of
/// `em_per_unit` ems.
#[rustfmt::skip]
pub const ADVANCES: [u8; 95] = [
    45,  55,  62, 115,  90, 132, 125,  40,
    55,  55,  71, 115,  45,  48,  45,  50,
    91,  91,  91,  91,  91,  91,  91,  91,
    91,  91,  50,  50, 120, 120, 120,  78,
   142, 102, 105, 110, 115, 105,  98, 105,
   125,  58,  58, 107,  95, 145, 125, 115,
    95, 115, 107,  95,  97, 118, 102, 150,
   100,  93, 100,  58,  50,  58, 119,  72,
    72,  86,  92,  80,  92,  85,  52,  92,
    92,  47,  47,  88,  48, 135,  92,  86,
    92,  92,  69,  75,  58,  92,  80, 121,
    81,  80,  76,  91,  49,  91, 118,
];

/// Advance assigned to anything outside printable ASCII
const OTHER_ADVANCE: u32 = 100;

/// Sum of proportional advances for `text`, in hundredths.
pub fn proportional_length(text: &str) -> u32 {
    text.chars()
        .map(|c| {
            if (' '..='~').contains(&c) {
                ADVANCES[(c as usize) - 0x20] as u32
            } else {
                OTHER_ADVANCE
            }
        })
        .sum()
}

/// Table-driven proportional metrics, approximating a sans-serif face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProportionalMetrics {
    /// Ems covered by 100 advance units
    pub em_per_unit: f64,
    pub bold: bool,
}

impl Default for ProportionalMetrics {
    fn default() -> Self {
        Self {
            em_per_unit: 0.6,
            bold: false,
        }
    }
}

impl ProportionalMetrics {
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

impl TextMetrics for ProportionalMetrics {
    fn width(&self, text: &str, font_size: Px) -> Px {
        let units = proportional_length(text) as f64 * 0.01;
        let mut width = units * self.em_per_unit * font_size.0;
        if self.bold {
            width *= defaults::BOLD_FACTOR;
        }
        Px(width)
    }
}

/// Every character advances the same amount
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMetrics {
    /// Advance per character, in ems
    pub advance: f64,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            advance: defaults::MONO_ADVANCE,
        }
    }
}

impl TextMetrics for MonospaceMetrics {
    fn width(&self, text: &str, font_size: Px) -> Px {
        Px(text.chars().count() as f64 * self.advance * font_size.0)
    }
}

impl<M: TextMetrics + ?Sized> TextMetrics for &M {
    fn width(&self, text: &str, font_size: Px) -> Px {
        (**self).width(text, font_size)
    }
}

impl<M: TextMetrics + ?Sized> TextMetrics for Box<M> {
    fn width(&self, text: &str, font_size: Px) -> Px {
        (**self).width(text, font_size)
    }
}
