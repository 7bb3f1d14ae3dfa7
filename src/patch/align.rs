//! Glyph alignment within the cell
//!
//! Computes the translation that places a (already scaled) glyph inside
//! the target cell, including the deliberate overlap shift that makes
//! separator glyphs bleed into the adjacent cell.

use super::dimensions::FontDimensions;
use super::table::{Align, GlyphAttributes, VAlign};
use crate::font::GlyphGeometry;

/// Computes per-glyph translations against one target cell.
#[derive(Debug, Clone, Copy)]
pub struct AlignmentEngine<'a> {
    dims: &'a FontDimensions,
}

impl<'a> AlignmentEngine<'a> {
    pub fn new(dims: &'a FontDimensions) -> Self {
        Self { dims }
    }

    /// The (dx, dy) translation for a glyph with the given layout
    /// policy, measured from its post-transform geometry.
    pub fn translation(&self, attributes: &GlyphAttributes, symbol: &GlyphGeometry) -> (f64, f64) {
        (self.horizontal(attributes, symbol), self.vertical(attributes, symbol))
    }

    /// Match the glyph's vertical center to the cell's vertical center.
    fn vertical(&self, attributes: &GlyphAttributes, symbol: &GlyphGeometry) -> f64 {
        match attributes.valign {
            VAlign::Center => {
                let symbol_center = symbol.ymax - symbol.height / 2.0;
                let cell_center = self.dims.ymax - self.dims.height / 2.0;
                cell_center - symbol_center
            }
            VAlign::None => 0.0,
        }
    }

    fn horizontal(&self, attributes: &GlyphAttributes, symbol: &GlyphGeometry) -> f64 {
        let mut dx = match attributes.align {
            Align::None => 0.0,
            // Baseline amount is a left-justify; center and right add
            // their share of the leftover cell width.
            Align::Left => self.dims.xmin - symbol.xmin,
            Align::Center => {
                self.dims.xmin - symbol.xmin + (self.dims.width / 2.0 - symbol.width / 2.0)
            }
            Align::Right => self.dims.xmin - symbol.xmin + (self.dims.width - symbol.width),
        };

        // Overlapping separators are pushed outward so the oversized
        // outline actually reaches into the neighboring cell.
        if let Some(overlap) = attributes.overlap {
            let shift = self.dims.width * overlap;
            match attributes.align {
                Align::Left => dx -= shift,
                Align::Right => dx += shift,
                _ => {}
            }
        }

        dx
    }
}
