//! Glyph transplanting
//!
//! The main control loop of a patch run: walks the patch registry in
//! table order, keeps the donor font open across adjacent entries that
//! share a source file, and for every donor glyph resolves its target
//! slot, copies the outline, scales it into the cell, aligns it, and
//! normalizes bearings and advance width.

use kurbo::Affine;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::align::AlignmentEngine;
use super::dimensions::FontDimensions;
use super::scale::ScaleCalculator;
use super::table::{PatchEntry, Stretch};
use crate::error::{PatchError, PatchResult};
use crate::font::{geometry, PatchFont};

/// Run-wide transplant policy from the CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransplantOptions {
    /// Single-width (monospace) mode: scale glyphs into the cell and
    /// force uniform advance widths.
    pub single: bool,
    /// Never overwrite an existing glyph at a target slot.
    pub careful: bool,
}

/// Counters over every attempted codepoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransplantStats {
    pub copied: usize,
    pub skipped_conflict: usize,
    pub skipped_invalid_slot: usize,
}

impl TransplantStats {
    pub fn attempted(&self) -> usize {
        self.copied + self.skipped_conflict + self.skipped_invalid_slot
    }

    fn merge(&mut self, other: TransplantStats) {
        self.copied += other.copied;
        self.skipped_conflict += other.skipped_conflict;
        self.skipped_invalid_slot += other.skipped_invalid_slot;
    }
}

/// Orchestrates glyph transplants into one exclusively-owned target.
pub struct GlyphTransplanter<'a> {
    target: &'a mut PatchFont,
    dims: &'a FontDimensions,
    options: TransplantOptions,
    em: f64,
}

impl<'a> GlyphTransplanter<'a> {
    pub fn new(
        target: &'a mut PatchFont,
        dims: &'a FontDimensions,
        options: TransplantOptions,
    ) -> Self {
        let em = target.units_per_em();
        Self {
            target,
            dims,
            options,
            em,
        }
    }

    /// Process the whole registry in table order.
    ///
    /// The open donor handle is the run's only scarce resource: it is
    /// reused across adjacent entries naming the same source file and
    /// dropped (closed) as soon as a different donor is needed, or when
    /// the loop ends.
    pub fn run(&mut self, entries: &[PatchEntry]) -> PatchResult<TransplantStats> {
        let mut stats = TransplantStats::default();
        let mut donor: Option<(PathBuf, PatchFont)> = None;

        for entry in entries.iter().filter(|e| e.enabled) {
            let reusable = donor
                .as_ref()
                .is_some_and(|(path, _)| *path == entry.source);
            if !reusable {
                // Drop the previous handle before opening the next.
                donor = None;
                let font =
                    PatchFont::open(&entry.source).map_err(|source| PatchError::DonorFont {
                        path: entry.source.clone(),
                        source,
                    })?;
                donor = Some((entry.source.clone(), font));
            }
            if let Some((_, donor_font)) = donor.as_ref() {
                stats.merge(self.apply_entry(entry, donor_font));
            }
        }

        Ok(stats)
    }

    /// Copy one entry's symbol range out of an already-open donor.
    pub fn apply_entry(&mut self, entry: &PatchEntry, donor: &PatchFont) -> TransplantStats {
        let copy_all = entry.is_copy_all();
        // Full-donor imports must never clobber existing target glyphs.
        let careful_entry = self.options.careful || copy_all;

        let donor_codepoints = if copy_all {
            donor.all_codepoints()
        } else {
            donor.codepoints_in(entry.sym_start, entry.sym_end)
        };
        info!(
            "Adding {} glyphs from {} set",
            donor_codepoints.len().max(1),
            entry.name
        );

        // Donor units normalized to target units at copy time.
        let unit_ratio = self.em / donor.units_per_em();
        let scale = ScaleCalculator::new(self.dims, self.em);
        let aligner = AlignmentEngine::new(self.dims);
        let group_factor = entry
            .scale_group
            .as_ref()
            .and_then(|group| scale.group_factor(donor, group, unit_ratio));

        let mut stats = TransplantStats::default();
        let mut next_slot = i64::from(entry.target_start());

        for &codepoint in &donor_codepoints {
            let attributes = *entry.attributes.resolve(codepoint);

            // Exact encoding pastes at the donor's own codepoint; a
            // remap assigns the target sequence in ascending order.
            let slot = if entry.exact || copy_all {
                i64::from(codepoint)
            } else {
                let assigned = next_slot;
                next_slot += 1;
                assigned
            };
            let Some(slot_char) = u32::try_from(slot).ok().and_then(char::from_u32) else {
                warn!(
                    "Found invalid glyph slot {slot:#x} for donor codepoint {codepoint:#06X}. Skipping."
                );
                stats.skipped_invalid_slot += 1;
                continue;
            };
            let slot_cp = slot_char as u32;

            if (careful_entry || attributes.careful) && self.target.contains(slot_cp) {
                debug!("Found existing glyph at {slot_cp:#06X}. Skipping.");
                stats.skipped_conflict += 1;
                continue;
            }

            let Some(mut contours) = donor.decomposed_outline(codepoint) else {
                continue;
            };
            let donor_name = donor.glyph_name(codepoint).unwrap_or_default().to_string();
            let width = donor.width(codepoint).unwrap_or(0.0) * unit_ratio;
            if (unit_ratio - 1.0).abs() > f64::EPSILON {
                geometry::transform_contours(&mut contours, Affine::scale(unit_ratio));
            }
            self.target
                .insert_outline(slot_char, &donor_name, contours, width);
            stats.copied += 1;

            self.scale_into_cell(slot_cp, codepoint, entry, &attributes, scale, group_factor);

            // Scaling invalidates the geometry snapshot; align from a
            // fresh measurement.
            if let Some(symbol) = self.target.geometry(slot_cp) {
                let (dx, dy) = aligner.translation(&attributes, &symbol);
                if dx != 0.0 || dy != 0.0 {
                    self.target.transform(slot_cp, Affine::translate((dx, dy)));
                }
            }

            // Alignment may have pushed the outline over an edge.
            self.target.clamp_negative_bearings(slot_cp);

            // Uniform cell pitch for every touched glyph, empty or not.
            if self.options.single {
                self.target.set_width(slot_cp, self.dims.width);
            }
        }

        stats
    }

    /// Steps 5-6 of the per-glyph pass: compute the two scale ratios
    /// and apply them in one transform.
    fn scale_into_cell(
        &mut self,
        slot_cp: u32,
        donor_cp: u32,
        entry: &PatchEntry,
        attributes: &super::table::GlyphAttributes,
        scale: ScaleCalculator<'_>,
        group_factor: Option<f64>,
    ) {
        let Some(symbol) = self.target.geometry(slot_cp) else {
            return;
        };

        let mut ratio_x = 1.0;
        let mut ratio_y = 1.0;

        // Zero-dimension glyphs are combining/overlay marks; their size
        // is never touched.
        if self.options.single && symbol.has_area() {
            match attributes.stretch {
                Stretch::PreserveAspect => {
                    let factor = match (&entry.scale_group, group_factor) {
                        // Grouped codepoints reuse the anchor's factor to
                        // keep the family's relative sizes.
                        (Some(group), Some(factor)) if group.contains(donor_cp) => factor,
                        _ => scale.scale_factor(&symbol),
                    };
                    ratio_x = factor;
                    ratio_y = factor;
                }
                stretch if stretch.stretches_x() => {
                    ratio_x = self.dims.width / symbol.width;
                }
                _ => {}
            }
        }

        // Separator glyphs span the full line height in both single and
        // double width mode.
        if attributes.stretch.stretches_y() && symbol.height > 0.0 {
            ratio_y = self.dims.height / symbol.height;
        }

        if ratio_x != 1.0 || ratio_y != 1.0 {
            if let Some(overlap) = attributes.overlap {
                ratio_x *= 1.0 + overlap;
                ratio_y *= 1.0 + overlap;
            }
            self.target
                .transform(slot_cp, Affine::scale_non_uniform(ratio_x, ratio_y));
        }
    }
}
