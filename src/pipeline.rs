//! End-to-end runs: folder in, deck or video out.

use std::path::PathBuf;

use crate::foundation::error::ReelError;

/// Slide deck run.
pub mod deck;
/// Video run.
pub mod video;

/// An input file that was left out of the output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedItem {
    /// Offending file.
    pub path: PathBuf,
    /// Why it was skipped.
    pub reason: String,
}

/// Outcome of a successful run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Pictures that made it into the output.
    pub written: usize,
    /// Pictures that were skipped, in processing order.
    pub skipped: Vec<SkippedItem>,
}

impl RunReport {
    /// Record a skipped item and log it.
    pub(crate) fn skip(&mut self, path: PathBuf, err: &ReelError) {
        tracing::warn!(file = %path.display(), error = %err, "skipping image");
        self.skipped.push(SkippedItem {
            path,
            reason: err.to_string(),
        });
    }
}

pub use deck::build_deck;
pub use video::{build_video, build_video_with_font};
