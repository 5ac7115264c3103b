//! Manifest patch results.

use std::path::PathBuf;

use serde::Serialize;

/// Result of patching one manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchOutcome {
    pub path: PathBuf,
    /// Number of `image:` fields that matched.
    pub replaced: usize,
    /// Whether the file content changed (and was written back).
    pub changed: bool,
}

impl PatchOutcome {
    /// True when no image field referred to the image.
    #[must_use]
    pub const fn is_unmatched(&self) -> bool {
        self.replaced == 0
    }
}
