//! Patch-run error taxonomy
//!
//! Only unrecoverable configuration problems are surfaced as errors; a
//! per-glyph problem (occupied slot under careful mode, unusable target
//! slot) is a skip recorded in the transplant statistics, never an error.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal conditions that abort the current patch run immediately.
///
/// There are no retries anywhere: every operation is a one-shot
/// deterministic transform over in-memory font state, so the first
/// unrecoverable condition ends the run.
#[derive(Debug, Error)]
pub enum PatchError {
    /// The target font could not be opened.
    #[error("cannot open target font {path:?}: {source}")]
    TargetFont {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// A donor symbol font named by an enabled patch entry is missing
    /// or unreadable.
    #[error("cannot open donor font {path:?}: {source}")]
    DonorFont {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// The output directory could not be created.
    #[error("cannot create output directory {path:?}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The patched font could not be written out.
    #[error("cannot save patched font to {path:?}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

pub type PatchResult<T> = Result<T, PatchError>;
