//! Small helper for collecting results from relocation steps.

use std::path::PathBuf;

/// Outcome of one or more relocation steps.
#[derive(Default, Debug)]
pub struct Report {
    /// Files that were rewritten on disk.
    pub changed_files: Vec<PathBuf>,
    /// Non-fatal conditions (missing artifacts, skipped keys).
    pub warnings: Vec<String>,
}

impl Report {
    /// Create an empty report indicating success.
    #[must_use]
    pub fn ok() -> Self {
        Self::default()
    }

    /// Add another report's data into `self`.
    pub fn absorb(&mut self, other: Self) {
        self.changed_files.extend(other.changed_files);
        self.warnings.extend(other.warnings);
    }
}
