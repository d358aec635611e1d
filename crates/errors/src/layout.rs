//! Install layout error types

use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum LayoutError {
    #[error("invalid install root {root}: {reason}")]
    InvalidRoot { root: String, reason: String },

    #[error("invalid python version {value}: expected MAJOR.MINOR")]
    InvalidPythonVersion { value: String },
}
