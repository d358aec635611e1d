//! Relocation error types
//!
//! Only read-modify-write failures are fatal. A missing descriptor tree or
//! a missing generated config file is a warning at the call site, not an
//! error here.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum RelocateError {
    #[error("cannot read {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("cannot rewrite {path}: {message}")]
    WriteFailed { path: String, message: String },
}
