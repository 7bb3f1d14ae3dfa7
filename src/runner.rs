//! Patch run orchestration
//!
//! Drives a whole run from parsed CLI arguments: resolves the list of
//! target fonts, and for each one renames it, strips ligature lookups,
//! measures it, transplants every selected donor set, normalizes
//! widths, and writes the result to the output directory.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::ConfigFile;
use crate::error::PatchError;
use crate::font::metrics::prepare_line_metrics;
use crate::font::{PatchFont, VerticalMetrics};
use crate::names::{self, NameOptions};
use crate::patch::{
    build_patch_set, mono, FontDimensions, GlyphTransplanter, TransplantOptions,
};

/// Run a full patch batch.
///
/// In a directory batch each font is patched independently: a fatal
/// error aborts that font's run but the batch continues, and the first
/// error is reported once the batch is done.
pub fn run(mut args: CliArgs) -> Result<()> {
    args.normalize();

    let targets = target_fonts(&args.font)?;
    let batch = targets.len() > 1;
    let mut first_error = None;
    for target in targets {
        match patch_one(&args, &target) {
            Ok(_) => {}
            Err(error) if batch => {
                tracing::error!("Failed to patch {}: {error:#}", target.display());
                first_error.get_or_insert(error);
            }
            Err(error) => return Err(error),
        }
    }
    match first_error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

/// Resolve the positional path into the list of fonts to patch.
///
/// A UFO is itself a directory, so only a directory without the .ufo
/// extension is treated as a batch of fonts.
fn target_fonts(path: &Path) -> Result<Vec<PathBuf>> {
    let is_ufo = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ufo"));
    if is_ufo || !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut targets = Vec::new();
    for dir_entry in std::fs::read_dir(path).map_err(|source| PatchError::TargetFont {
        path: path.to_path_buf(),
        source: source.into(),
    })? {
        let entry_path = dir_entry
            .map_err(|source| PatchError::TargetFont {
                path: path.to_path_buf(),
                source: source.into(),
            })?
            .path();
        if entry_path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("ufo"))
        {
            targets.push(entry_path);
        }
    }
    targets.sort();
    if targets.is_empty() {
        warn!("No UFO fonts found in {}", path.display());
    } else {
        info!("Patching {} fonts from {}", targets.len(), path.display());
    }
    Ok(targets)
}

/// Patch a single font file end to end.
fn patch_one(args: &CliArgs, target: &Path) -> Result<PathBuf> {
    info!("Patching {}", target.display());
    let mut font = PatchFont::open(target).map_err(|source| PatchError::TargetFont {
        path: target.to_path_buf(),
        source,
    })?;

    let fullname = names::rewrite(&mut font, &NameOptions::from_args(args));
    remove_ligatures(&mut font, args);

    std::fs::create_dir_all(&args.output_dir).map_err(|source| PatchError::OutputDir {
        path: args.output_dir.clone(),
        source,
    })?;

    prepare_line_metrics(&mut font, args.adjust_line_height);
    let metrics = VerticalMetrics::read(&font);
    let dims = FontDimensions::analyze(&font, &metrics);
    debug!(
        "Cell is {} x {} (ascent {}, descent {})",
        dims.width, dims.height, metrics.ascent, metrics.descent
    );

    let entries = build_patch_set(args);
    let options = TransplantOptions {
        single: args.single,
        careful: args.careful,
    };
    let stats = GlyphTransplanter::new(&mut font, &dims, options).run(&entries)?;
    info!(
        "Copied {} glyphs ({} conflicts skipped, {} invalid slots skipped)",
        stats.copied, stats.skipped_conflict, stats.skipped_invalid_slot
    );

    if args.single {
        mono::normalize(&mut font, dims.width);
    }

    let output = args
        .output_dir
        .join(output_file_name(&fullname, args.extension.as_deref()));
    font.save(&output).map_err(|source| PatchError::Save {
        path: output.clone(),
        source,
    })?;
    info!("Generated {}", output.display());

    if let Some(script) = &args.postprocess {
        postprocess(script, &output);
    }
    Ok(output)
}

/// File name for the generated font. Only UFO output is supported, so
/// any other requested extension falls back with a warning.
fn output_file_name(fullname: &str, extension: Option<&str>) -> String {
    let requested = extension.map(|ext| ext.trim_start_matches('.'));
    match requested {
        Some(ext) if !ext.eq_ignore_ascii_case("ufo") && !ext.is_empty() => {
            warn!("Output format '{ext}' is not supported, generating a UFO instead");
            format!("{fullname}.ufo")
        }
        _ => format!("{fullname}.ufo"),
    }
}

/// Strip the ligature lookups named in the configuration file from the
/// font's feature code. A lookup that cannot be found or removed is
/// logged and skipped, never fatal.
fn remove_ligatures(font: &mut PatchFont, args: &CliArgs) {
    if !args.remove_ligatures {
        if args.config_file.is_none() {
            debug!("No configuration file given, skipping related actions");
        }
        return;
    }
    let Some(config_path) = &args.config_file else {
        warn!("No configuration file given, unable to remove ligatures");
        return;
    };
    let Some(config) = ConfigFile::load(config_path) else {
        warn!("Unable to read configuration file, unable to remove ligatures");
        return;
    };

    info!("Removing ligature lookups from the configuration file");
    let features = font.features_mut();
    for lookup in &config.ligatures {
        let (stripped, removed) = strip_feature_blocks(features, lookup);
        if removed > 0 {
            info!("Successfully removed lookup: {lookup}");
            *features = stripped;
        } else {
            warn!("Failed to remove lookup: {lookup}");
        }
    }
}

/// Remove every `lookup NAME { ... } NAME;` or `feature NAME { ... }
/// NAME;` block from feature code, returning the stripped text and the
/// number of blocks removed.
fn strip_feature_blocks(features: &str, name: &str) -> (String, usize) {
    let lookup_open = format!("lookup {name} {{");
    let feature_open = format!("feature {name} {{");
    let close = format!("}} {name};");

    let mut kept: Vec<&str> = Vec::new();
    let mut removed = 0;
    let mut in_block = false;
    for line in features.lines() {
        let trimmed = line.trim();
        if in_block {
            if trimmed == close {
                in_block = false;
                removed += 1;
            }
            continue;
        }
        if trimmed == lookup_open || trimmed == feature_open {
            in_block = true;
            continue;
        }
        kept.push(line);
    }
    if in_block {
        // Unterminated block: keep the original text rather than
        // truncating the feature code.
        return (features.to_string(), 0);
    }

    let mut out = kept.join("\n");
    if features.ends_with('\n') && !out.is_empty() {
        out.push('\n');
    }
    (out, removed)
}

/// Invoke the post-processing script with the generated path as its
/// only argument. Failures are reported but never abort the run.
fn postprocess(script: &Path, output: &Path) {
    match Command::new(script).arg(output).status() {
        Ok(status) if status.success() => {
            info!("Post processed {}", output.display());
        }
        Ok(status) => {
            warn!(
                "Post processing script exited with {status} for {}",
                output.display()
            );
        }
        Err(error) => {
            warn!(
                "Could not run post processing script {}: {error}",
                script.display()
            );
        }
    }
}
