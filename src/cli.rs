//! Command line interface for the glyphpatch font patcher
//!
//! Handles parsing command line arguments and provides validation for
//! user inputs before a patch run starts.

use clap::Parser;
use std::path::PathBuf;

/// Glyphpatch CLI arguments
///
/// Examples:
///   glyphpatch MyFont.ufo                    # Patch with the default donor sets
///   glyphpatch MyFont.ufo --mono --complete  # Single-width, every donor set
///   glyphpatch fonts/ --powerline --careful  # Patch a directory, keep existing glyphs
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "glyphpatch",
    version,
    about = "Patches a font with symbol glyphs from donor icon fonts",
    long_about = "Glyphpatch copies glyph outlines from a set of donor symbol fonts into \
specific codepoint slots of a target UFO font, scaling and aligning each glyph to the \
target's monospace cell so the result renders correctly in terminals."
)]
pub struct CliArgs {
    /// Path to the font to patch, or a directory of fonts to patch in turn
    #[clap(help = "The path to the font to patch or a directory of fonts")]
    pub font: PathBuf,

    /// Generate glyphs as single-width rather than double-width
    ///
    /// Forces every glyph to the same advance width so the font is
    /// recognized as monospaced (notably by Windows).
    #[clap(
        long = "mono",
        short = 's',
        alias = "use-single-width-glyphs",
        help = "Generate glyphs as single-width, not double-width"
    )]
    pub single: bool,

    /// Adjust line heights to center separator glyphs more evenly
    #[clap(
        long = "adjust-line-height",
        short = 'l',
        help = "Adjust line heights (attempt to center powerline separators more evenly)"
    )]
    pub adjust_line_height: bool,

    /// Do not generate verbose output
    #[clap(long = "quiet", short = 'q', help = "Do not generate verbose output")]
    pub quiet: bool,

    /// Limit the internal font name to 31 characters (Windows compatibility)
    #[clap(
        long = "windows",
        short = 'w',
        help = "Limit the internal font name to 31 characters (for Windows compatibility)"
    )]
    pub windows: bool,

    /// Add all available donor glyph sets
    #[clap(long = "complete", short = 'c', help = "Add all available glyphs")]
    pub complete: bool,

    /// Force encoding compatibility with complete donor sets
    ///
    /// Switches donor sets that would normally keep their own encoding
    /// (Octicons, Font Logos) to the remapped target ranges used by
    /// complete builds, so partial and complete patches agree on slots.
    #[clap(long = "compat", help = "Force compatibility with complete glyph sets")]
    pub compat: bool,

    /// Never overwrite a glyph that already exists at a target slot
    #[clap(long = "careful", help = "Do not overwrite existing glyphs if detected")]
    pub careful: bool,

    /// Remove the ligature lookups listed in the configuration file
    #[clap(
        long = "removeligatures",
        alias = "removeligs",
        help = "Remove ligature lookups specified in the JSON configuration file"
    )]
    pub remove_ligatures: bool,

    /// Path to a JSON configuration file
    ///
    /// Currently carries the list of ligature lookups removed by
    /// --removeligatures.
    #[clap(long = "configfile", help = "Path to a JSON configuration file")]
    pub config_file: Option<PathBuf>,

    /// Script to run on each generated font file after saving
    #[clap(
        long = "postprocess",
        help = "Specify a script for post processing, invoked with the generated file path"
    )]
    pub postprocess: Option<PathBuf>,

    /// A custom donor symbol font; all of its glyphs are copied unscaled
    #[clap(
        long = "custom",
        help = "Specify a custom symbol font. All new glyphs are copied with no scaling applied"
    )]
    pub custom: Option<PathBuf>,

    /// Font file extension for the generated output
    #[clap(
        long = "extension",
        alias = "ext",
        help = "Change the font file type to create (defaults to the source's extension)"
    )]
    pub extension: Option<String>,

    /// Directory the patched font files are written to
    #[clap(
        long = "outputdir",
        alias = "out",
        default_value = ".",
        help = "The directory to output the patched font file to"
    )]
    pub output_dir: PathBuf,

    /// Directory holding the donor symbol font files
    #[clap(
        long = "glyphdir",
        default_value = "src/glyphs",
        help = "The directory containing the donor symbol fonts"
    )]
    pub glyph_dir: PathBuf,

    // Donor symbol sets.
    #[clap(long = "fontawesome", help = "Add Font Awesome glyphs (http://fontawesome.io/)")]
    pub fontawesome: bool,

    #[clap(
        long = "fontawesomeextension",
        help = "Add Font Awesome Extension glyphs (https://andrelzgava.github.io/font-awesome-extension/)"
    )]
    pub fontawesome_extension: bool,

    #[clap(
        long = "fontlinux",
        alias = "fontlogos",
        help = "Add Font Logos glyphs (https://github.com/Lukas-W/font-logos)"
    )]
    pub fontlinux: bool,

    #[clap(long = "octicons", help = "Add Octicons glyphs (https://octicons.github.com)")]
    pub octicons: bool,

    #[clap(
        long = "powersymbols",
        help = "Add IEC Power Symbols (https://unicodepowersymbol.com/)"
    )]
    pub powersymbols: bool,

    #[clap(
        long = "pomicons",
        help = "Add Pomicon glyphs (https://github.com/gabrielelana/pomicons)"
    )]
    pub pomicons: bool,

    #[clap(long = "powerline", help = "Add Powerline glyphs")]
    pub powerline: bool,

    #[clap(
        long = "powerlineextra",
        help = "Add Powerline Extra glyphs (https://github.com/ryanoasis/powerline-extra-symbols)"
    )]
    pub powerline_extra: bool,

    #[clap(
        long = "material",
        aliases = ["materialdesignicons", "mdi"],
        help = "Add Material Design Icons (https://github.com/templarian/MaterialDesign)"
    )]
    pub material: bool,

    #[clap(
        long = "weather",
        alias = "weathericons",
        help = "Add Weather Icons (https://github.com/erikflowers/weather-icons)"
    )]
    pub weather: bool,
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    ///
    /// Ensures that all paths exist before the run starts, providing
    /// clear error messages for common mistakes.
    pub fn validate(&self) -> Result<(), String> {
        if !self.font.exists() {
            return Err(format!(
                "Font path does not exist: {}\nMake sure the path is correct and the file exists.",
                self.font.display()
            ));
        }

        if let Some(config) = &self.config_file {
            if !config.is_file() {
                return Err(format!(
                    "Configuration file does not exist: {}",
                    config.display()
                ));
            }
        }

        if let Some(custom) = &self.custom {
            if !custom.is_file() {
                return Err(format!(
                    "Custom symbol font does not exist: {}",
                    custom.display()
                ));
            }
        }

        Ok(())
    }

    /// Whether this run effectively includes every donor set
    ///
    /// True when --complete was passed, or when every individual donor
    /// set flag was enabled by hand.
    pub fn is_complete(&self) -> bool {
        self.complete
            || (self.fontawesome
                && self.fontawesome_extension
                && self.fontlinux
                && self.octicons
                && self.powersymbols
                && self.pomicons
                && self.powerline
                && self.powerline_extra
                && self.material
                && self.weather)
    }

    /// Expand --complete into the individual donor set flags.
    pub fn normalize(&mut self) {
        if self.is_complete() {
            self.complete = true;
            self.fontawesome = true;
            self.fontawesome_extension = true;
            self.fontlinux = true;
            self.octicons = true;
            self.powersymbols = true;
            self.pomicons = true;
            self.powerline = true;
            self.powerline_extra = true;
            self.material = true;
            self.weather = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(cmdline: &[&str]) -> CliArgs {
        CliArgs::parse_from(cmdline)
    }

    #[test]
    fn all_set_flags_imply_complete() {
        let mut a = args(&[
            "glyphpatch",
            "font.ufo",
            "--fontawesome",
            "--fontawesomeextension",
            "--fontlinux",
            "--octicons",
            "--powersymbols",
            "--pomicons",
            "--powerline",
            "--powerlineextra",
            "--material",
            "--weather",
        ]);
        assert!(!a.complete);
        assert!(a.is_complete());
        a.normalize();
        assert!(a.complete);
    }

    #[test]
    fn complete_enables_every_set() {
        let mut a = args(&["glyphpatch", "font.ufo", "--complete"]);
        a.normalize();
        assert!(a.fontawesome && a.weather && a.powerline && a.material);
    }

    #[test]
    fn partial_sets_are_not_complete() {
        let a = args(&["glyphpatch", "font.ufo", "--powerline", "--octicons"]);
        assert!(!a.is_complete());
    }
}
