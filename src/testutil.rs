//! Shared fixtures for unit tests: tiny in-memory UFO fonts built from
//! rectangle outlines.

use std::path::PathBuf;

use norad::{Contour, ContourPoint, Font, Glyph, PointType};

use crate::font::PatchFont;

/// A closed rectangular contour from corner points.
pub fn rect_contour(x0: f64, y0: f64, x1: f64, y1: f64) -> Contour {
    let corner = |x, y| ContourPoint::new(x, y, PointType::Line, false, None, None);
    Contour::new(
        vec![
            corner(x0, y0),
            corner(x1, y0),
            corner(x1, y1),
            corner(x0, y1),
        ],
        None,
    )
}

/// An encoded glyph whose outline is one rectangle.
pub fn rect_glyph(
    name: &str,
    codepoint: char,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    width: f64,
) -> Glyph {
    let mut glyph = Glyph::new(name);
    glyph.width = width;
    glyph.codepoints.insert(codepoint);
    glyph.contours.push(rect_contour(x0, y0, x1, y1));
    glyph
}

/// An encoded glyph with no outline at all.
pub fn empty_glyph(name: &str, codepoint: char, width: f64) -> Glyph {
    let mut glyph = Glyph::new(name);
    glyph.width = width;
    glyph.codepoints.insert(codepoint);
    glyph
}

/// A font on the given em with one rectangle glyph per entry, each
/// entry being `(codepoint, xmin, ymin, xmax, ymax, advance)`.
///
/// Vertical metrics are the usual 80/20 split of the em, so an em of
/// 1000 yields ascent 800 and descent 200.
pub fn test_font(em: f64, glyphs: &[(u32, f64, f64, f64, f64, f64)]) -> PatchFont {
    let mut font = Font::new();
    font.font_info.units_per_em = norad::fontinfo::NonNegativeIntegerOrFloat::new(em);
    font.font_info.ascender = Some(em * 0.8);
    font.font_info.descender = Some(-(em * 0.2));
    font.font_info.family_name = Some("Test Font".to_string());

    let layer = font.default_layer_mut();
    for &(cp, x0, y0, x1, y1, width) in glyphs {
        let ch = char::from_u32(cp).expect("test codepoint must be a valid char");
        let name = format!("uni{cp:04X}");
        layer.insert_glyph(rect_glyph(&name, ch, x0, y0, x1, y1, width));
    }

    PatchFont::from_font(font, PathBuf::from("test.ufo"))
}
