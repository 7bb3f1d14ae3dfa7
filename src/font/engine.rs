//! UFO font access for patching
//!
//! `PatchFont` wraps a norad font behind the small set of outline
//! editing primitives a patch run needs: per-codepoint lookup and
//! existence tests, outline copy, affine transforms, bearing and
//! advance-width writes, and saving. Every operation takes explicit
//! codepoints or glyph names; there is no hidden selection state.

use anyhow::{Context, Result};
use kurbo::Affine;
use norad::{Contour, Font, Glyph};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::geometry::{self, GlyphGeometry};

/// A UFO font opened for patching, with a codepoint-to-glyph index.
pub struct PatchFont {
    font: Font,
    path: PathBuf,
    cmap: BTreeMap<u32, String>,
}

impl PatchFont {
    /// Open a UFO font from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let font = Font::load(&path)
            .with_context(|| format!("loading UFO font {}", path.display()))?;
        Ok(Self::from_font(font, path))
    }

    /// Wrap an already-loaded font (used by tests and in-memory donors).
    pub fn from_font(font: Font, path: PathBuf) -> Self {
        let cmap = build_cmap(&font);
        Self { font, path, cmap }
    }

    /// Save the font. UFO lib, note and feature data survive the
    /// round trip, which is what preserves the patcher's changelog note.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.font
            .save(path)
            .with_context(|| format!("saving UFO font {}", path.display()))?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn font_info(&self) -> &norad::FontInfo {
        &self.font.font_info
    }

    pub fn font_info_mut(&mut self) -> &mut norad::FontInfo {
        &mut self.font.font_info
    }

    pub fn features_mut(&mut self) -> &mut String {
        &mut self.font.features
    }

    /// Units per em, defaulting to 1000 when unset.
    pub fn units_per_em(&self) -> f64 {
        self.font
            .font_info
            .units_per_em
            .map(|v| v.to_string().parse().unwrap_or(1000.0))
            .unwrap_or(1000.0)
    }

    /// Whether any glyph is encoded at the given codepoint.
    pub fn contains(&self, codepoint: u32) -> bool {
        self.cmap.contains_key(&codepoint)
    }

    /// Name of the glyph encoded at the given codepoint.
    pub fn glyph_name(&self, codepoint: u32) -> Option<&str> {
        self.cmap.get(&codepoint).map(String::as_str)
    }

    /// All encoded codepoints present in the font, ascending.
    pub fn all_codepoints(&self) -> Vec<u32> {
        self.cmap.keys().copied().collect()
    }

    /// Encoded codepoints within an inclusive range, ascending.
    pub fn codepoints_in(&self, start: u32, end: u32) -> Vec<u32> {
        self.cmap.range(start..=end).map(|(cp, _)| *cp).collect()
    }

    /// Names of every glyph in the default layer, encoded or not.
    pub fn glyph_names(&self) -> Vec<String> {
        self.font
            .default_layer()
            .iter()
            .map(|g| g.name().to_string())
            .collect()
    }

    pub fn glyph_count(&self) -> usize {
        self.font.default_layer().len()
    }

    pub fn width(&self, codepoint: u32) -> Option<f64> {
        self.glyph_at(codepoint).map(|g| g.width)
    }

    pub fn width_by_name(&self, name: &str) -> Option<f64> {
        self.font.default_layer().get_glyph(name).map(|g| g.width)
    }

    pub fn set_width(&mut self, codepoint: u32, width: f64) {
        if let Some(name) = self.cmap.get(&codepoint).cloned() {
            self.set_width_by_name(&name, width);
        }
    }

    pub fn set_width_by_name(&mut self, name: &str, width: f64) {
        if let Some(glyph) = self.font.default_layer_mut().get_glyph_mut(name) {
            glyph.width = width;
        }
    }

    /// The glyph's outline with all component references flattened into
    /// plain contours, ready for transplanting into another font.
    pub fn decomposed_outline(&self, codepoint: u32) -> Option<Vec<Contour>> {
        let name = self.cmap.get(&codepoint)?;
        Some(self.decomposed_contours(name, 0))
    }

    /// Bounding-box geometry of the glyph at a codepoint, components
    /// included. `None` when the glyph is missing or has no outline.
    pub fn geometry(&self, codepoint: u32) -> Option<GlyphGeometry> {
        let name = self.cmap.get(&codepoint)?;
        self.geometry_by_name(name)
    }

    pub fn geometry_by_name(&self, name: &str) -> Option<GlyphGeometry> {
        let contours = self.decomposed_contours(name, 0);
        geometry::contours_bounds(&contours).map(GlyphGeometry::from_rect)
    }

    /// Install an outline at a codepoint slot, replacing whatever glyph
    /// was encoded there. The new glyph keeps the donor's display name
    /// for provenance, disambiguated if the target already uses it.
    pub fn insert_outline(
        &mut self,
        codepoint: char,
        donor_name: &str,
        contours: Vec<Contour>,
        width: f64,
    ) {
        let cp = codepoint as u32;
        self.evict_codepoint(cp);

        let name = self.free_name(donor_name, cp);
        let mut glyph = Glyph::new(&name);
        glyph.width = width;
        glyph.contours = contours;
        glyph.codepoints.insert(codepoint);
        self.font.default_layer_mut().insert_glyph(glyph);
        self.cmap.insert(cp, name);
    }

    /// Apply an affine transform to the glyph at a codepoint.
    pub fn transform(&mut self, codepoint: u32, affine: Affine) {
        if let Some(name) = self.cmap.get(&codepoint).cloned() {
            self.transform_by_name(&name, affine);
        }
    }

    pub fn transform_by_name(&mut self, name: &str, affine: Affine) {
        if let Some(glyph) = self.font.default_layer_mut().get_glyph_mut(name) {
            geometry::transform_contours(&mut glyph.contours, affine);
            for component in glyph.components.iter_mut() {
                component.transform = geometry::affine_to_ufo(
                    affine * geometry::affine_from_ufo(&component.transform),
                );
            }
        }
    }

    /// Set negative left/right side bearings to zero.
    ///
    /// A negative left bearing is removed by shifting the outline right;
    /// a negative right bearing by widening the advance to the outline's
    /// right edge. Glyphs without an outline are left alone.
    pub fn clamp_negative_bearings(&mut self, codepoint: u32) {
        if let Some(name) = self.cmap.get(&codepoint).cloned() {
            self.clamp_negative_bearings_by_name(&name);
        }
    }

    pub fn clamp_negative_bearings_by_name(&mut self, name: &str) {
        let Some(geom) = self.geometry_by_name(name) else {
            return;
        };
        let mut xmax = geom.xmax;
        if geom.xmin < 0.0 {
            self.transform_by_name(name, Affine::translate((-geom.xmin, 0.0)));
            xmax -= geom.xmin;
        }
        if let Some(glyph) = self.font.default_layer_mut().get_glyph_mut(name) {
            if glyph.width < xmax {
                glyph.width = xmax;
            }
        }
    }

    fn glyph_at(&self, codepoint: u32) -> Option<&Glyph> {
        let name = self.cmap.get(&codepoint)?;
        self.font.default_layer().get_glyph(name)
    }

    fn decomposed_contours(&self, name: &str, depth: usize) -> Vec<Contour> {
        let Some(glyph) = self.font.default_layer().get_glyph(name) else {
            return Vec::new();
        };
        let mut contours = glyph.contours.clone();
        // Guard against cyclic component references.
        if depth < 8 {
            for component in &glyph.components {
                let base = component.base.to_string();
                let mut nested = self.decomposed_contours(&base, depth + 1);
                geometry::transform_contours(
                    &mut nested,
                    geometry::affine_from_ufo(&component.transform),
                );
                contours.append(&mut nested);
            }
        }
        contours
    }

    /// Drop the mapping for a codepoint: remove the glyph that owns it,
    /// or just un-encode it when the glyph carries other codepoints too.
    fn evict_codepoint(&mut self, codepoint: u32) {
        let Some(old_name) = self.cmap.remove(&codepoint) else {
            return;
        };
        let layer = self.font.default_layer_mut();
        let Some(old) = layer.get_glyph_mut(&old_name) else {
            return;
        };
        let remaining: Vec<char> = old
            .codepoints
            .iter()
            .filter(|c| *c as u32 != codepoint)
            .collect();
        if remaining.is_empty() {
            layer.remove_glyph(&old_name);
        } else {
            old.codepoints = remaining.into_iter().collect();
        }
    }

    /// Pick a glyph name not already taken by a different glyph.
    fn free_name(&self, wanted: &str, codepoint: u32) -> String {
        let layer = self.font.default_layer();
        if !wanted.is_empty() && !layer.contains_glyph(wanted) {
            return wanted.to_string();
        }
        let uni = format!("uni{codepoint:04X}");
        if !layer.contains_glyph(&uni) {
            return uni;
        }
        let mut counter = 1;
        loop {
            let candidate = format!("{uni}.{counter}");
            if !layer.contains_glyph(&candidate) {
                return candidate;
            }
            counter += 1;
        }
    }
}

fn build_cmap(font: &Font) -> BTreeMap<u32, String> {
    let mut cmap = BTreeMap::new();
    for glyph in font.default_layer().iter() {
        for codepoint in glyph.codepoints.iter() {
            cmap.entry(codepoint as u32)
                .or_insert_with(|| glyph.name().to_string());
        }
    }
    cmap
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{rect_contour, rect_glyph, test_font};

    #[test]
    fn cmap_lookup_and_ranges() {
        let font = test_font(1000.0, &[(0x41, 0.0, 0.0, 500.0, 700.0, 600.0)]);
        assert!(font.contains(0x41));
        assert!(!font.contains(0x42));
        assert_eq!(font.codepoints_in(0x40, 0x50), vec![0x41]);
        assert_eq!(font.codepoints_in(0x100, 0x200), Vec::<u32>::new());
    }

    #[test]
    fn insert_outline_replaces_slot() {
        let mut font = test_font(1000.0, &[(0x41, 0.0, 0.0, 500.0, 700.0, 600.0)]);
        let count = font.glyph_count();
        font.insert_outline('\u{41}', "replacement", vec![rect_contour(0.0, 0.0, 100.0, 100.0)], 250.0);
        assert_eq!(font.glyph_count(), count);
        assert_eq!(font.width(0x41), Some(250.0));
        let geom = font.geometry(0x41).unwrap();
        assert_eq!(geom.xmax, 100.0);
    }

    #[test]
    fn insert_outline_disambiguates_names() {
        let mut font = test_font(1000.0, &[(0x41, 0.0, 0.0, 500.0, 700.0, 600.0)]);
        let existing = font.glyph_name(0x41).unwrap().to_string();
        font.insert_outline('\u{E000}', &existing, vec![rect_contour(0.0, 0.0, 10.0, 10.0)], 100.0);
        let new_name = font.glyph_name(0xE000).unwrap();
        assert_ne!(new_name, existing);
        assert!(font.contains(0x41));
    }

    #[test]
    fn clamp_shifts_negative_left_bearing() {
        let glyph = rect_glyph("overhang", '\u{E000}', -50.0, 0.0, 450.0, 500.0, 600.0);
        let mut norad_font = norad::Font::new();
        norad_font.default_layer_mut().insert_glyph(glyph);
        let mut font = PatchFont::from_font(norad_font, std::path::PathBuf::from("test.ufo"));
        font.clamp_negative_bearings(0xE000);
        let geom = font.geometry(0xE000).unwrap();
        assert_eq!(geom.xmin, 0.0);
        assert_eq!(geom.xmax, 500.0);
        // Width untouched: right bearing was still positive after the shift.
        assert_eq!(font.width(0xE000), Some(600.0));
    }

    #[test]
    fn clamp_widens_negative_right_bearing() {
        let glyph = rect_glyph("wide", '\u{E001}', 0.0, 0.0, 700.0, 500.0, 600.0);
        let mut norad_font = norad::Font::new();
        norad_font.default_layer_mut().insert_glyph(glyph);
        let mut font = PatchFont::from_font(norad_font, std::path::PathBuf::from("test.ufo"));
        font.clamp_negative_bearings(0xE001);
        assert_eq!(font.width(0xE001), Some(700.0));
    }

    #[test]
    fn decompose_flattens_components() {
        let mut norad_font = norad::Font::new();
        norad_font
            .default_layer_mut()
            .insert_glyph(rect_glyph("base", '\u{41}', 0.0, 0.0, 100.0, 100.0, 200.0));
        let mut composite = Glyph::new("composite");
        composite.width = 200.0;
        composite.codepoints.insert('\u{E000}');
        composite.components.push(norad::Component::new(
            "base".parse().unwrap(),
            norad::AffineTransform {
                x_scale: 1.0,
                xy_scale: 0.0,
                yx_scale: 0.0,
                y_scale: 1.0,
                x_offset: 50.0,
                y_offset: 0.0,
            },
            None,
        ));
        norad_font.default_layer_mut().insert_glyph(composite);
        let font = PatchFont::from_font(norad_font, std::path::PathBuf::from("test.ufo"));
        let geom = font.geometry(0xE000).unwrap();
        assert_eq!(geom.xmin, 50.0);
        assert_eq!(geom.xmax, 150.0);
    }

    #[test]
    fn save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roundtrip.ufo");
        let font = test_font(1000.0, &[(0x41, 10.0, 0.0, 510.0, 700.0, 600.0)]);
        font.save(&path).unwrap();
        let reloaded = PatchFont::open(&path).unwrap();
        assert!(reloaded.contains(0x41));
        assert_eq!(reloaded.width(0x41), Some(600.0));
    }
}
