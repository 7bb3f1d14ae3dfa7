//! Vertical metrics handling
//!
//! Reads the ascent/descent pair that defines the patch cell's vertical
//! extent and performs the pre-patch line-dimension setup: line gaps are
//! zeroed, and `--adjust-line-height` evens up the total line size so
//! separator glyphs center cleanly.

use super::engine::PatchFont;

/// The target font's vertical reference values.
///
/// `descent` is kept positive (the win-metrics convention); the cell
/// bottom is at `-descent`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalMetrics {
    pub em: f64,
    pub ascent: f64,
    pub descent: f64,
}

impl VerticalMetrics {
    /// Read metrics from the font, preferring the win ascent/descent
    /// pair and falling back to the typographic ascender/descender,
    /// then to UPM-proportional defaults.
    pub fn read(font: &PatchFont) -> Self {
        let em = font.units_per_em();
        let info = font.font_info();
        let ascent = info
            .open_type_os2_win_ascent
            .map(|v| v as f64)
            .or(info.ascender)
            .unwrap_or(em * 0.8);
        let descent = info
            .open_type_os2_win_descent
            .map(|v| v as f64)
            .or_else(|| info.descender.map(|d| -d))
            .unwrap_or(em * 0.2);
        Self { em, ascent, descent }
    }

    /// Total line height spanned by the cell.
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent
    }
}

/// Set up line dimensions before patching.
///
/// The win and hhea values set here are what sets the line height on
/// Windows and Mac respectively. An even total line size centers the
/// separator glyphs more evenly, hence the +1 nudge under
/// `--adjust-line-height`. Line gap would add space below the line that
/// separator glyphs cannot fill, so both gaps are zeroed always.
pub fn prepare_line_metrics(font: &mut PatchFont, adjust_line_height: bool) {
    let em = font.units_per_em();
    let info = font.font_info_mut();

    let ascender = info.ascender.unwrap_or(em * 0.8);
    let descender = info.descender.unwrap_or(-(em * 0.2));
    let mut win_ascent = info
        .open_type_os2_win_ascent
        .unwrap_or(ascender.max(0.0).round() as u32);
    let win_descent = info
        .open_type_os2_win_descent
        .unwrap_or((-descender).max(0.0).round() as u32);

    if adjust_line_height {
        if (win_ascent + win_descent) % 2 != 0 {
            win_ascent += 1;
        }
        // Make the line size identical for Windows and Mac.
        info.open_type_hhea_ascender = Some(win_ascent as i32);
        info.open_type_hhea_descender = Some(-(win_descent as i32));
    }

    info.open_type_os2_win_ascent = Some(win_ascent);
    info.open_type_os2_win_descent = Some(win_descent);
    info.open_type_hhea_line_gap = Some(0);
    info.open_type_os2_typo_line_gap = Some(0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::test_font;

    #[test]
    fn reads_win_metrics_with_fallbacks() {
        let font = test_font(1000.0, &[]);
        // test_font sets ascender 800 / descender -200 but no win metrics.
        let metrics = VerticalMetrics::read(&font);
        assert_eq!(metrics.ascent, 800.0);
        assert_eq!(metrics.descent, 200.0);
        assert_eq!(metrics.line_height(), 1000.0);
    }

    #[test]
    fn zeroes_line_gaps() {
        let mut font = test_font(1000.0, &[]);
        prepare_line_metrics(&mut font, false);
        let info = font.font_info();
        assert_eq!(info.open_type_hhea_line_gap, Some(0));
        assert_eq!(info.open_type_os2_typo_line_gap, Some(0));
        // hhea ascent/descent untouched without the adjust flag.
        assert_eq!(info.open_type_hhea_ascender, None);
    }

    #[test]
    fn adjust_makes_line_size_even() {
        let mut font = test_font(1000.0, &[]);
        font.font_info_mut().open_type_os2_win_ascent = Some(801);
        font.font_info_mut().open_type_os2_win_descent = Some(200);
        prepare_line_metrics(&mut font, true);
        let info = font.font_info();
        assert_eq!(info.open_type_os2_win_ascent, Some(802));
        assert_eq!(info.open_type_hhea_ascender, Some(802));
        assert_eq!(info.open_type_hhea_descender, Some(-200));
    }

    #[test]
    fn adjust_leaves_even_line_size_alone() {
        let mut font = test_font(1000.0, &[]);
        font.font_info_mut().open_type_os2_win_ascent = Some(800);
        font.font_info_mut().open_type_os2_win_descent = Some(200);
        prepare_line_metrics(&mut font, true);
        assert_eq!(font.font_info().open_type_os2_win_ascent, Some(800));
    }
}
