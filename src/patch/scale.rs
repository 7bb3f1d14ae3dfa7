//! Scale factor computation
//!
//! Aspect-preserving scaling fits a donor glyph into the cell; grouped
//! scaling reuses one anchor's factor across a whole family of glyphs
//! so their relative sizes survive the transplant.

use super::dimensions::FontDimensions;
use super::table::ScaleGroup;
use crate::font::{GlyphGeometry, PatchFont};

/// Computes scale factors against one target cell.
#[derive(Debug, Clone, Copy)]
pub struct ScaleCalculator<'a> {
    dims: &'a FontDimensions,
    em: f64,
}

impl<'a> ScaleCalculator<'a> {
    pub fn new(dims: &'a FontDimensions, em: f64) -> Self {
        Self { dims, em }
    }

    /// The largest uniform factor that keeps the glyph within both the
    /// cell width and the font's em square.
    ///
    /// The vertical bound is the em, not the total line height: line
    /// height includes the descent region and sizing symbols against it
    /// makes them crowd the line.
    pub fn scale_factor(&self, symbol: &GlyphGeometry) -> f64 {
        let ratio_x = self.dims.width / symbol.width;
        let ratio_y = self.em / symbol.height;
        ratio_x.min(ratio_y)
    }

    /// The shared factor for a scale group, computed once from the
    /// anchor glyph in the donor font.
    ///
    /// `unit_ratio` converts donor units to target units (target em /
    /// donor em), applied before measuring so the factor matches what a
    /// transplanted copy of the anchor would get.
    pub fn group_factor(
        &self,
        donor: &PatchFont,
        group: &ScaleGroup,
        unit_ratio: f64,
    ) -> Option<f64> {
        let anchor = donor.geometry(group.anchor)?.scaled(unit_ratio);
        if !anchor.has_area() {
            return None;
        }
        Some(self.scale_factor(&anchor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::table::CodepointSpan;
    use crate::testutil::test_font;

    fn dims(width: f64, height: f64) -> FontDimensions {
        FontDimensions {
            xmin: 0.0,
            ymin: -(height - height * 0.8),
            xmax: width,
            ymax: height * 0.8,
            width,
            height,
        }
    }

    #[test]
    fn preserve_aspect_fits_both_bounds() {
        // Cell width 600, em 1000, 300x300 glyph: min(600/300, 1000/300) = 2.
        let d = dims(600.0, 1000.0);
        let calc = ScaleCalculator::new(&d, 1000.0);
        let symbol = GlyphGeometry {
            xmin: 0.0,
            ymin: 0.0,
            xmax: 300.0,
            ymax: 300.0,
            width: 300.0,
            height: 300.0,
        };
        assert_eq!(calc.scale_factor(&symbol), 2.0);
    }

    #[test]
    fn wide_glyph_is_bounded_by_cell_width() {
        let d = dims(600.0, 1000.0);
        let calc = ScaleCalculator::new(&d, 1000.0);
        let symbol = GlyphGeometry {
            xmin: 0.0,
            ymin: 0.0,
            xmax: 1200.0,
            ymax: 400.0,
            width: 1200.0,
            height: 400.0,
        };
        assert_eq!(calc.scale_factor(&symbol), 0.5);
    }

    #[test]
    fn group_factor_comes_from_anchor() {
        let donor = test_font(
            1000.0,
            &[
                (0xE60E, 0.0, 0.0, 500.0, 500.0, 600.0), // anchor, 500x500
                (0xE6BD, 0.0, 0.0, 100.0, 100.0, 600.0), // tiny member
            ],
        );
        let d = dims(600.0, 1000.0);
        let calc = ScaleCalculator::new(&d, 1000.0);
        let group = ScaleGroup {
            anchor: 0xE60E,
            members: vec![CodepointSpan::Range(0xE6BD, 0xE6C3)],
        };
        // min(600/500, 1000/500) = 1.2 regardless of any member's own box.
        assert_eq!(calc.group_factor(&donor, &group, 1.0), Some(1.2));
    }

    #[test]
    fn group_factor_is_unit_normalized() {
        let donor = test_font(2000.0, &[(0xE60E, 0.0, 0.0, 1000.0, 1000.0, 1200.0)]);
        let d = dims(600.0, 1000.0);
        let calc = ScaleCalculator::new(&d, 1000.0);
        let group = ScaleGroup {
            anchor: 0xE60E,
            members: vec![],
        };
        // Donor em 2000 -> anchor measures 500x500 in target units.
        assert_eq!(calc.group_factor(&donor, &group, 0.5), Some(1.2));
    }

    #[test]
    fn missing_anchor_yields_no_group_factor() {
        let donor = test_font(1000.0, &[]);
        let d = dims(600.0, 1000.0);
        let calc = ScaleCalculator::new(&d, 1000.0);
        let group = ScaleGroup {
            anchor: 0xE60E,
            members: vec![],
        };
        assert_eq!(calc.group_factor(&donor, &group, 1.0), None);
    }
}
