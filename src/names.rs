//! Font renaming for patched output
//!
//! Derives the patched font's family, style, PostScript and full names
//! from the source font plus the selected symbol sets, applies the
//! reserved-name substitutions required by OFL font licenses, and
//! records provenance in the font's notes and version string.

use tracing::{debug, warn};

use crate::cli::CliArgs;
use crate::font::PatchFont;

const PROJECT_NAME: &str = "Glyphpatch";
const PROJECT_ABBR: &str = "GP";
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Windows GDI rejects family names longer than this.
const MAX_FAMILY_LENGTH: usize = 31;

/// Licenses with a Reserved Font Name clause forbid shipping a modified
/// font under the original name.
const RESERVED_REPLACEMENTS: &[(&str, &str)] = &[
    ("source", "sauce"),
    ("Source", "Sauce"),
    ("hermit", "hurmit"),
    ("Hermit", "Hurmit"),
    ("hasklig", "hasklug"),
    ("Hasklig", "Hasklug"),
    ("share", "shure"),
    ("Share", "Shure"),
    ("IBMPlex", "Blex"),
    ("ibmplex", "blex"),
    ("IBM-Plex", "Blex"),
    ("IBM Plex", "Blex"),
    ("terminus", "terminess"),
    ("Terminus", "Terminess"),
    ("liberation", "literation"),
    ("Liberation", "Literation"),
    ("iAWriter", "iMWriting"),
    ("iA Writer", "iM Writing"),
    ("iA-Writer", "iM-Writing"),
    ("Anka/Coder", "AnaConder"),
];

/// Strip overly verbose branding from upstream Powerline builds. The
/// longer phrase must be replaced before the bare word.
const POWERLINE_REPLACEMENTS: &[(&str, &str)] = &[
    ("for Powerline", ""),
    ("ForPowerline", ""),
    ("Powerline", ""),
];

/// The flags of a patch run that influence the output names.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameOptions {
    pub windows: bool,
    pub single: bool,
    pub complete: bool,
    pub fontawesome: bool,
    pub fontawesome_extension: bool,
    pub octicons: bool,
    pub powersymbols: bool,
    pub pomicons: bool,
    pub fontlinux: bool,
    pub material: bool,
    pub weather: bool,
}

impl NameOptions {
    pub fn from_args(args: &CliArgs) -> Self {
        Self {
            windows: args.windows,
            single: args.single,
            complete: args.is_complete() || args.compat,
            fontawesome: args.fontawesome,
            fontawesome_extension: args.fontawesome_extension,
            octicons: args.octicons,
            powersymbols: args.powersymbols,
            pomicons: args.pomicons,
            fontlinux: args.fontlinux,
            material: args.material,
            weather: args.weather,
        }
    }

    /// Short and verbose name suffixes for the selected sets, both
    /// starting with a space.
    fn suffixes(&self) -> (String, String) {
        let mut verbose = format!(" {PROJECT_NAME}");
        let mut short = if self.windows {
            format!(" {PROJECT_ABBR}")
        } else {
            verbose.clone()
        };

        if self.complete {
            short = format!(" {PROJECT_NAME} Complete");
            verbose = short.clone();
        } else {
            let sets: &[(bool, &str, &str)] = &[
                (self.fontawesome, " A", " Plus Font Awesome"),
                (self.fontawesome_extension, " AE", " Plus Font Awesome Extension"),
                (self.octicons, " O", " Plus Octicons"),
                (self.powersymbols, " PS", " Plus Power Symbols"),
                (self.pomicons, " P", " Plus Pomicons"),
                (self.fontlinux, " L", " Plus Font Logos (Font Linux)"),
                (self.material, " MDI", " Plus Material Design Icons"),
                (self.weather, " WEA", " Plus Weather Icons"),
            ];
            for &(selected, abbr, name) in sets {
                if selected {
                    short.push_str(abbr);
                    verbose.push_str(name);
                }
            }
        }

        if self.single {
            short.push_str(" M");
            verbose.push_str(" Mono");
        }

        (short, verbose)
    }
}

/// Rewrite all name fields of `font` and return the new full name,
/// which doubles as the output file stem.
pub fn rewrite(font: &mut PatchFont, options: &NameOptions) -> String {
    let info = font.font_info();
    let source_ps_name = info
        .postscript_font_name
        .clone()
        .or_else(|| info.family_name.as_ref().map(|f| f.replace(' ', "")))
        .unwrap_or_else(|| "Unknown".to_string());

    // Split the PostScript name around its dashes: the leading part is
    // the family, the trailing part is a style fallback (e.g. "Bold").
    let base = source_ps_name
        .split('-')
        .next()
        .unwrap_or(&source_ps_name)
        .to_string();
    let fallback_style = match source_ps_name.rsplit_once('-') {
        Some((_, style)) if !style.is_empty() => style.to_string(),
        _ => "Regular".to_string(),
    };

    // The recorded style wins unless it is the uninformative "Regular",
    // where the name-derived style tends to be more accurate.
    let subfamily = match info.style_name.as_deref() {
        Some(style) if !style.is_empty() && style != "Regular" => style.to_string(),
        Some("Regular") => fallback_style.clone(),
        _ => {
            warn!("Font has no style name, falling back to the parsed PostScript name");
            fallback_style.clone()
        }
    };

    let source_full = info
        .postscript_full_name
        .clone()
        .or_else(|| info.family_name.clone())
        .unwrap_or_else(|| base.clone());

    let (short_suffix, verbose_suffix) = options.suffixes();

    // The full name (and output filename) always gets the long form.
    let mut fullname = format!("{source_full}{verbose_suffix}");
    let mut fontname = format!("{base}{}", short_suffix.replace(' ', ""));
    let mut familyname = base;

    if options.windows {
        let max_font_length = MAX_FAMILY_LENGTH.saturating_sub(1 + subfamily.len());
        familyname.push_str(&format!(" {PROJECT_ABBR}"));
        fullname.push_str(" Windows Compatible");
        fontname.truncate(max_font_length.min(fontname.len()));
        familyname.truncate(MAX_FAMILY_LENGTH.min(familyname.len()));
    } else {
        familyname.push_str(&format!(" {PROJECT_NAME}"));
        if options.single {
            familyname.push_str(" Mono");
        }
    }

    // The subfamily is never truncated: identically-named fonts with
    // different styles collapse into one font on macOS.
    fontname.push('-');
    fontname.push_str(&subfamily);

    familyname = substitute(&familyname);
    fullname = substitute(&fullname);
    fontname = substitute(&fontname);

    let provenance = format!(
        "Patched with {PROJECT_NAME} {VERSION} (https://crates.io/crates/glyphpatch)"
    );

    let info = font.font_info_mut();
    info.family_name = Some(familyname.clone());
    info.style_name = Some(subfamily.clone());
    info.postscript_font_name = Some(fontname.clone());
    info.postscript_full_name = Some(fullname.clone());
    info.open_type_name_preferred_family_name = Some(familyname.clone());
    info.open_type_name_preferred_subfamily_name = Some(subfamily);
    info.open_type_name_compatible_full_name = Some(fullname.clone());
    info.note = Some(provenance);
    info.open_type_name_version = Some(match info.open_type_name_version.take() {
        Some(version) => format!("{version};{PROJECT_NAME} {VERSION}"),
        None => format!("{PROJECT_NAME} {VERSION}"),
    });

    debug!("Renamed font to '{familyname}' ('{fontname}')");
    fullname
}

/// Apply the reserved-name and Powerline substitutions and collapse
/// runs of whitespace left behind by removals.
fn substitute(name: &str) -> String {
    let mut out = name.to_string();
    for &(from, to) in RESERVED_REPLACEMENTS.iter().chain(POWERLINE_REPLACEMENTS) {
        out = out.replace(from, to);
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
