//! Font access, outline geometry, and vertical metrics
//!
//! This module is the patcher's view of a font: everything else in the
//! crate manipulates fonts exclusively through these types.

pub mod engine;
pub mod geometry;
pub mod metrics;

pub use engine::PatchFont;
pub use geometry::GlyphGeometry;
pub use metrics::VerticalMetrics;
