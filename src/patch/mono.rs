//! Whole-font monospace normalization
//!
//! The final pass of a single-width run: every glyph in the font, not
//! just the transplanted ones, is forced onto the uniform cell advance
//! so terminals treat the result as strictly monospaced.

use tracing::info;

use crate::font::PatchFont;

/// Set every glyph's advance to `cell_width`, clamping negative
/// bearings first so no outline is left hanging off the left edge.
///
/// Glyphs already at the cell width are untouched. Zero-width glyphs
/// (combining marks) get the cell advance but keep their outline
/// position, since shifting them would break mark attachment.
pub fn normalize(font: &mut PatchFont, cell_width: f64) {
    let mut adjusted = 0usize;
    for name in font.glyph_names() {
        let Some(width) = font.width_by_name(&name) else {
            continue;
        };
        if width == cell_width {
            continue;
        }
        if width != 0.0 {
            font.clamp_negative_bearings_by_name(&name);
        }
        font.set_width_by_name(&name, cell_width);
        adjusted += 1;
    }
    info!("Normalized {adjusted} glyph advance widths to {cell_width}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::test_font;

    #[test]
    fn all_widths_become_the_cell_width() {
        let mut font = test_font(
            1000.0,
            &[
                (0x41, 0.0, 0.0, 480.0, 700.0, 500.0),
                (0x57, 0.0, 0.0, 900.0, 700.0, 950.0), // a wide W
                (0x69, 0.0, 0.0, 120.0, 700.0, 220.0), // a narrow i
            ],
        );
        normalize(&mut font, 600.0);
        for cp in [0x41, 0x57, 0x69] {
            assert_eq!(font.width(cp), Some(600.0));
        }
    }

    #[test]
    fn matching_widths_are_left_alone() {
        let mut font = test_font(1000.0, &[(0x41, -50.0, 0.0, 480.0, 700.0, 600.0)]);
        let before = font.geometry(0x41).unwrap();
        normalize(&mut font, 600.0);
        // Width already matches, so even the negative bearing survives.
        assert_eq!(font.geometry(0x41).unwrap(), before);
        assert_eq!(font.width(0x41), Some(600.0));
    }

    #[test]
    fn zero_width_outline_is_not_shifted() {
        // A combining mark drawn left of the origin with zero advance.
        let mut font = test_font(1000.0, &[(0x0300, -300.0, 500.0, -100.0, 700.0, 0.0)]);
        normalize(&mut font, 600.0);
        let geom = font.geometry(0x0300).unwrap();
        assert_eq!(geom.xmin, -300.0);
        assert_eq!(font.width(0x0300), Some(600.0));
    }

    #[test]
    fn oversized_glyph_bearing_is_clamped() {
        let mut font = test_font(1000.0, &[(0x41, -40.0, 0.0, 480.0, 700.0, 500.0)]);
        normalize(&mut font, 600.0);
        let geom = font.geometry(0x41).unwrap();
        assert_eq!(geom.xmin, 0.0);
        assert_eq!(font.width(0x41), Some(600.0));
    }
}
