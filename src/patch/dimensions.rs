//! Target cell geometry
//!
//! Derives the reference cell every donor glyph is normalized into,
//! once, before any patching. Horizontal extent comes from the widest
//! Latin glyph; vertical extent from the font's win ascent/descent.

use crate::font::{PatchFont, VerticalMetrics};

/// The target font's monospace reference cell. Immutable for the
/// duration of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontDimensions {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
    /// Cell width: the largest advance width observed over the Latin
    /// Extended-A span.
    pub width: f64,
    /// Total line height, |ymin| + ymax.
    pub height: f64,
}

impl FontDimensions {
    /// Scan the Latin Extended-A span (0x00-0x17F) of the target font
    /// and combine it with the vertical metrics.
    ///
    /// Glyphs with no outline report an empty bounding box and are
    /// skipped; that is expected, not an error.
    pub fn analyze(font: &PatchFont, metrics: &VerticalMetrics) -> Self {
        let mut width: f64 = 0.0;
        let mut xmax: f64 = 0.0;

        for codepoint in font.codepoints_in(0x0000, 0x017F) {
            let Some(geometry) = font.geometry(codepoint) else {
                continue;
            };
            if let Some(advance) = font.width(codepoint) {
                width = width.max(advance);
            }
            xmax = xmax.max(geometry.xmax);
        }

        let ymin = -metrics.descent;
        let ymax = metrics.ascent;
        Self {
            xmin: 0.0,
            ymin,
            xmax,
            ymax,
            width,
            height: ymin.abs() + ymax,
        }
    }
}
