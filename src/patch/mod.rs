//! Patch pipeline: registry, measurement, scaling, alignment, and the
//! transplanting loop itself.

pub mod align;
pub mod dimensions;
pub mod mono;
pub mod scale;
pub mod table;
pub mod transplant;

pub use align::AlignmentEngine;
pub use dimensions::FontDimensions;
pub use scale::ScaleCalculator;
pub use table::{build_patch_set, PatchEntry};
pub use transplant::{GlyphTransplanter, TransplantOptions, TransplantStats};
