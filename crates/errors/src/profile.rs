//! Build profile error types

use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum ProfileError {
    #[error("cannot read profile {path}: {message}")]
    Io { path: String, message: String },

    #[error("invalid profile JSON: {message}")]
    Parse { message: String },

    #[error("profile has no section for package {package}")]
    MissingPackage { package: String },
}
