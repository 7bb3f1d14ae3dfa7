//! The patch table
//!
//! A declarative registry of donor ranges: which donor font supplies
//! each codepoint range, where the glyphs land in the target, and the
//! per-codepoint layout policy (alignment, stretch, overlap) applied
//! while they are normalized to the target cell.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::cli::CliArgs;

/// Horizontal placement of a glyph within the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
    /// Keep the donor's own horizontal position.
    None,
}

/// Vertical placement of a glyph within the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    #[default]
    Center,
    None,
}

/// How a glyph is scaled into the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stretch {
    /// Largest uniform scale that fits both cell width and em square.
    #[default]
    PreserveAspect,
    /// Fill the cell width exactly.
    X,
    /// Fill the full line height exactly.
    Y,
    /// Fill both directions exactly.
    Xy,
    /// No scaling at all.
    None,
}

impl Stretch {
    pub fn stretches_x(self) -> bool {
        matches!(self, Stretch::X | Stretch::Xy)
    }

    pub fn stretches_y(self) -> bool {
        matches!(self, Stretch::Y | Stretch::Xy)
    }
}

/// Layout policy for one codepoint (or a range's default).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlyphAttributes {
    pub align: Align,
    pub valign: VAlign,
    pub stretch: Stretch,
    /// Oversize ratio applied so adjoining separator glyphs merge
    /// without a seam. Must be within (0, 1).
    pub overlap: Option<f64>,
    /// Per-glyph careful mode: never overwrite an occupied slot.
    pub careful: bool,
}

impl GlyphAttributes {
    fn separator(align: Align, overlap: Option<f64>) -> Self {
        Self {
            align,
            valign: VAlign::Center,
            stretch: Stretch::Xy,
            overlap,
            careful: false,
        }
    }
}

/// Attribute lookup with per-codepoint overrides and a mandatory
/// default. Exactly one policy resolves for any codepoint.
#[derive(Debug, Clone)]
pub struct AttributeMap {
    default: GlyphAttributes,
    overrides: BTreeMap<u32, GlyphAttributes>,
}

impl AttributeMap {
    pub fn new(default: GlyphAttributes) -> Self {
        Self {
            default,
            overrides: BTreeMap::new(),
        }
    }

    pub fn with_override(mut self, codepoint: u32, attributes: GlyphAttributes) -> Self {
        self.overrides.insert(codepoint, attributes);
        self
    }

    pub fn resolve(&self, codepoint: u32) -> &GlyphAttributes {
        self.overrides.get(&codepoint).unwrap_or(&self.default)
    }
}

/// A single codepoint or an inclusive codepoint range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodepointSpan {
    Single(u32),
    Range(u32, u32),
}

impl CodepointSpan {
    pub fn contains(self, codepoint: u32) -> bool {
        match self {
            CodepointSpan::Single(cp) => cp == codepoint,
            CodepointSpan::Range(start, end) => (start..=end).contains(&codepoint),
        }
    }
}

/// A family of codepoints sharing one scale factor, computed from the
/// anchor glyph, so their relative sizes stay consistent.
#[derive(Debug, Clone)]
pub struct ScaleGroup {
    pub anchor: u32,
    pub members: Vec<CodepointSpan>,
}

impl ScaleGroup {
    pub fn contains(&self, codepoint: u32) -> bool {
        self.members.iter().any(|span| span.contains(codepoint))
    }
}

/// One donor range import rule.
#[derive(Debug, Clone)]
pub struct PatchEntry {
    pub enabled: bool,
    pub name: String,
    /// Path of the donor symbol font supplying this range.
    pub source: PathBuf,
    /// Paste each donor glyph at its own codepoint rather than
    /// remapping into the target range.
    pub exact: bool,
    pub sym_start: u32,
    pub sym_end: u32,
    /// Target range; when unset the symbol range is reused.
    pub target_start: Option<u32>,
    pub target_end: Option<u32>,
    pub scale_group: Option<ScaleGroup>,
    pub attributes: AttributeMap,
}

impl PatchEntry {
    /// Resolved target range start (defaults to the symbol range).
    pub fn target_start(&self) -> u32 {
        self.target_start.unwrap_or(self.sym_start)
    }

    /// A symbol range starting at zero means "all glyphs in the donor"
    /// and forces careful mode so existing glyphs are never clobbered.
    pub fn is_copy_all(&self) -> bool {
        self.sym_start == 0
    }
}

/// Attribute map shared by the powerline separator sets: separators are
/// stretched to fill the cell exactly, and the open-sided ones are
/// oversized a little so adjacent cells merge without a seam.
fn powerline_attributes() -> AttributeMap {
    let mut map = AttributeMap::new(GlyphAttributes::default());
    // Arrow tips, bottom and top triangles, trapezoids.
    for cp in [
        0xE0B0, 0xE0B1, 0xE0B8, 0xE0B9, 0xE0BC, 0xE0BD, 0xE0D1, 0xE0D2,
    ] {
        map = map.with_override(cp, GlyphAttributes::separator(Align::Left, Some(0.02)));
    }
    for cp in [0xE0B2, 0xE0B3, 0xE0BA, 0xE0BB, 0xE0BE, 0xE0BF, 0xE0D4] {
        map = map.with_override(cp, GlyphAttributes::separator(Align::Right, Some(0.02)));
    }
    // Rounded arcs, flames, waveform.
    for cp in [0xE0B4, 0xE0B5, 0xE0C0, 0xE0C1, 0xE0C8] {
        map = map.with_override(cp, GlyphAttributes::separator(Align::Left, Some(0.01)));
    }
    for cp in [0xE0B6, 0xE0B7, 0xE0C2, 0xE0C3] {
        map = map.with_override(cp, GlyphAttributes::separator(Align::Right, Some(0.01)));
    }
    // Squares, hexagons, one of the lego pieces.
    for cp in [0xE0C4, 0xE0C6, 0xE0CC, 0xE0CD, 0xE0CE] {
        map = map.with_override(cp, GlyphAttributes::separator(Align::Left, None));
    }
    for cp in [0xE0C5, 0xE0C7] {
        map = map.with_override(cp, GlyphAttributes::separator(Align::Right, None));
    }
    map.with_override(0xE0CF, GlyphAttributes::separator(Align::Center, None))
}

/// Font Awesome: defaults plus arrows that keep their own vertical
/// position instead of being centered.
fn fontawesome_attributes() -> AttributeMap {
    let uncentered = GlyphAttributes {
        valign: VAlign::None,
        ..GlyphAttributes::default()
    };
    AttributeMap::new(GlyphAttributes::default())
        .with_override(0xF0DC, uncentered)
        .with_override(0xF0DD, uncentered)
        .with_override(0xF0DE, uncentered)
}

/// Custom donor fonts are copied as-is: centered, no vertical
/// centering, no scaling.
fn custom_attributes() -> AttributeMap {
    AttributeMap::new(GlyphAttributes {
        align: Align::Center,
        valign: VAlign::None,
        stretch: Stretch::None,
        overlap: None,
        careful: false,
    })
}

fn devicons_scale_group() -> ScaleGroup {
    ScaleGroup {
        anchor: 0xE60E,
        members: vec![CodepointSpan::Range(0xE6BD, 0xE6C3)],
    }
}

/// Font Awesome glyphs that must stay relative in size to each other
/// rather than being individually maximized.
fn fontawesome_scale_group() -> ScaleGroup {
    use CodepointSpan::{Range, Single};
    ScaleGroup {
        anchor: 0xF17A,
        members: vec![
            Single(0xF005),
            Single(0xF006),
            Range(0xF026, 0xF028),
            Single(0xF02B),
            Single(0xF02C),
            Range(0xF031, 0xF035),
            Range(0xF044, 0xF054),
            Range(0xF060, 0xF063),
            Single(0xF077),
            Single(0xF078),
            Single(0xF07D),
            Single(0xF07E),
            Single(0xF089),
            Range(0xF0D7, 0xF0DA),
            Range(0xF0DC, 0xF0DE),
            Range(0xF100, 0xF107),
            Single(0xF141),
            Single(0xF142),
            Range(0xF153, 0xF15A),
            Range(0xF175, 0xF178),
            Single(0xF182),
            Single(0xF183),
            Range(0xF221, 0xF22D),
            Range(0xF255, 0xF25B),
        ],
    }
}

fn octicons_scale_group() -> ScaleGroup {
    use CodepointSpan::{Range, Single};
    ScaleGroup {
        anchor: 0xF02E,
        members: vec![
            Range(0xF03D, 0xF040),
            Single(0xF044),
            Range(0xF051, 0xF053),
            Single(0xF05A),
            Single(0xF05B),
            Single(0xF071),
            Single(0xF078),
            Range(0xF09F, 0xF0AA),
            Single(0xF0CA),
        ],
    }
}

/// Build the full patch registry for a run.
///
/// Entry order matters for donor-file caching: adjacent entries sharing
/// a donor keep it open across both.
pub fn build_patch_set(args: &CliArgs) -> Vec<PatchEntry> {
    let glyph_dir = &args.glyph_dir;
    let defaults = AttributeMap::new(GlyphAttributes::default());

    // Some donor sets keep their own encoding only while nothing else
    // wants those slots; overlapping sets fall back to remapped ranges.
    let mut octicons_exact = true;
    let mut fontlinux_exact = true;
    if args.compat {
        octicons_exact = false;
        fontlinux_exact = false;
    }
    if args.fontawesome && args.octicons {
        octicons_exact = false;
    }
    if args.fontawesome || args.octicons {
        fontlinux_exact = false;
    }

    let entry = |enabled: bool,
                 name: &str,
                 file: &str,
                 exact: bool,
                 sym: (u32, u32),
                 target: Option<(u32, u32)>,
                 scale_group: Option<ScaleGroup>,
                 attributes: AttributeMap| {
        PatchEntry {
            enabled,
            name: name.to_string(),
            source: glyph_dir.join(file),
            exact,
            sym_start: sym.0,
            sym_end: sym.1,
            target_start: target.map(|t| t.0),
            target_end: target.map(|t| t.1),
            scale_group,
            attributes,
        }
    };

    let mut set = vec![
        entry(
            true,
            "Seti-UI + Custom",
            "original-source.ufo",
            false,
            (0xE4FA, 0xE52E),
            Some((0xE5FA, 0xE62E)),
            None,
            defaults.clone(),
        ),
        entry(
            true,
            "Devicons",
            "devicons.ufo",
            false,
            (0xE600, 0xE6C5),
            Some((0xE700, 0xE7C5)),
            Some(devicons_scale_group()),
            defaults.clone(),
        ),
        entry(
            args.powerline,
            "Powerline Symbols",
            "PowerlineSymbols.ufo",
            true,
            (0xE0A0, 0xE0A2),
            None,
            None,
            powerline_attributes(),
        ),
        entry(
            args.powerline,
            "Powerline Symbols",
            "PowerlineSymbols.ufo",
            true,
            (0xE0B0, 0xE0B3),
            None,
            None,
            powerline_attributes(),
        ),
        entry(
            args.powerline_extra,
            "Powerline Extra Symbols",
            "PowerlineExtraSymbols.ufo",
            true,
            (0xE0A3, 0xE0A3),
            None,
            None,
            powerline_attributes(),
        ),
        entry(
            args.powerline_extra,
            "Powerline Extra Symbols",
            "PowerlineExtraSymbols.ufo",
            true,
            (0xE0B4, 0xE0C8),
            None,
            None,
            powerline_attributes(),
        ),
        entry(
            args.powerline_extra,
            "Powerline Extra Symbols",
            "PowerlineExtraSymbols.ufo",
            true,
            (0xE0CA, 0xE0CA),
            None,
            None,
            powerline_attributes(),
        ),
        entry(
            args.powerline_extra,
            "Powerline Extra Symbols",
            "PowerlineExtraSymbols.ufo",
            true,
            (0xE0CC, 0xE0D4),
            None,
            None,
            powerline_attributes(),
        ),
        entry(
            args.pomicons,
            "Pomicons",
            "Pomicons.ufo",
            true,
            (0xE000, 0xE00A),
            None,
            None,
            defaults.clone(),
        ),
        entry(
            args.fontawesome,
            "Font Awesome",
            "FontAwesome.ufo",
            true,
            (0xF000, 0xF2E0),
            None,
            Some(fontawesome_scale_group()),
            fontawesome_attributes(),
        ),
        entry(
            args.fontawesome_extension,
            "Font Awesome Extension",
            "font-awesome-extension.ufo",
            false,
            (0xE000, 0xE0A9),
            Some((0xE200, 0xE2A9)),
            None,
            defaults.clone(),
        ),
        // Power, Power On/Off, Power On, Sleep.
        entry(
            args.powersymbols,
            "Power Symbols",
            "Unicode_IEC_symbol_font.ufo",
            true,
            (0x23FB, 0x23FE),
            None,
            None,
            defaults.clone(),
        ),
        // Heavy Circle (aka Power Off).
        entry(
            args.powersymbols,
            "Power Symbols",
            "Unicode_IEC_symbol_font.ufo",
            true,
            (0x2B58, 0x2B58),
            None,
            None,
            defaults.clone(),
        ),
        entry(
            args.material,
            "Material",
            "materialdesignicons-webfont.ufo",
            false,
            (0xF001, 0xF847),
            Some((0xF500, 0xFD46)),
            None,
            defaults.clone(),
        ),
        entry(
            args.weather,
            "Weather Icons",
            "weathericons-regular-webfont.ufo",
            false,
            (0xF000, 0xF0EB),
            Some((0xE300, 0xE3EB)),
            None,
            defaults.clone(),
        ),
        entry(
            args.fontlinux,
            "Font Logos (Font Linux)",
            "font-logos.ufo",
            fontlinux_exact,
            (0xF100, 0xF11C),
            Some((0xF300, 0xF31C)),
            None,
            defaults.clone(),
        ),
        entry(
            args.octicons,
            "Octicons",
            "octicons.ufo",
            octicons_exact,
            (0xF000, 0xF105),
            Some((0xF400, 0xF505)),
            Some(octicons_scale_group()),
            defaults.clone(),
        ),
        // Heart.
        entry(
            args.octicons,
            "Octicons",
            "octicons.ufo",
            octicons_exact,
            (0x2665, 0x2665),
            None,
            Some(octicons_scale_group()),
            defaults.clone(),
        ),
        // Zap.
        entry(
            args.octicons,
            "Octicons",
            "octicons.ufo",
            octicons_exact,
            (0x26A1, 0x26A1),
            None,
            Some(octicons_scale_group()),
            defaults.clone(),
        ),
        // Desktop.
        entry(
            args.octicons,
            "Octicons",
            "octicons.ufo",
            octicons_exact,
            (0xF27C, 0xF2BD),
            Some((0xF4A9, 0xF4EA)),
            Some(octicons_scale_group()),
            defaults,
        ),
    ];

    if let Some(custom) = &args.custom {
        set.push(PatchEntry {
            enabled: true,
            name: "Custom".to_string(),
            source: custom_source(custom, glyph_dir),
            exact: true,
            sym_start: 0x0000,
            sym_end: 0x0000,
            target_start: Some(0x0000),
            target_end: Some(0x0000),
            scale_group: None,
            attributes: custom_attributes(),
        });
    }

    set
}

/// A custom donor path is taken as-is when absolute, otherwise relative
/// to the glyph directory.
fn custom_source(custom: &Path, glyph_dir: &Path) -> PathBuf {
    if custom.is_absolute() || custom.exists() {
        custom.to_path_buf()
    } else {
        glyph_dir.join(custom)
    }
}
