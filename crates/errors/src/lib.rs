#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Error types for the qpsdk build orchestrator
//!
//! This crate provides fine-grained error types organized by domain.
//! Warning-level conditions (missing artifacts, pattern mismatches) are not
//! errors at all; they are logged by the crates that detect them and
//! execution continues.

use std::borrow::Cow;

use thiserror::Error;

pub mod build;
pub mod layout;
pub mod profile;
pub mod relocate;

// Re-export all error types at the root
pub use build::BuildError;
pub use layout::LayoutError;
pub use profile::ProfileError;
pub use relocate::RelocateError;

/// Generic error type for cross-crate boundaries
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("relocation error: {0}")]
    Relocate(#[from] RelocateError),

    #[error("build error: {0}")]
    Build(#[from] BuildError),

    #[error("profile error: {0}")]
    Profile(#[from] ProfileError),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("I/O error: {message}")]
    Io {
        kind: std::io::ErrorKind,
        message: String,
        path: Option<std::path::PathBuf>,
    },
}

impl Error {
    /// Create an internal error with a message
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Create an Io error with an associated path
    pub fn io_with_path(err: &std::io::Error, path: impl Into<std::path::PathBuf>) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
            path: Some(path.into()),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
            path: None,
        }
    }
}

/// Result type alias for qpsdk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Minimal interface for rendering user-facing error information.
pub trait UserFacingError {
    /// Short message suitable for CLI output.
    fn user_message(&self) -> Cow<'_, str>;

    /// Optional remediation hint.
    fn user_hint(&self) -> Option<&'static str> {
        None
    }
}

impl UserFacingError for Error {
    fn user_message(&self) -> Cow<'_, str> {
        match self {
            Error::Build(err) => err.user_message(),
            Error::Io { message, .. } => Cow::Owned(message.clone()),
            _ => Cow::Owned(self.to_string()),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Error::Build(err) => err.user_hint(),
            Error::Layout(_) => Some("Pass --install-root with a usable directory path."),
            Error::Profile(_) => Some("Check the build profile JSON passed via --profile."),
            _ => None,
        }
    }
}
