//! Glyphpatch
//!
//! Patches a target UFO font with glyphs transplanted from donor symbol
//! fonts, then normalizes their geometry so the result renders as a
//! monospaced, line-height-consistent font suitable for terminal use.

pub mod cli;
pub mod config;
pub mod error;
pub mod font;
pub mod names;
pub mod patch;
pub mod runner;

#[cfg(test)]
pub(crate) mod testutil;
