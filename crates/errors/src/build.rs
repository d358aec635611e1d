//! Build orchestration error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum BuildError {
    #[error("{package}: need a source directory")]
    MissingSourceDir { package: String },

    #[error("{package}: no such directory: {path}")]
    SourceDirNotFound { package: String, path: String },

    #[error("no version of the form X.Y.Z in {path}")]
    VersionNotFound { path: String },

    #[error("command failed with {status}: {command}")]
    CommandFailed { command: String, status: String },

    #[error("required tool not found: {name}")]
    MissingTool { name: String },

    #[error("{package} cannot be built on {platform}")]
    UnsupportedPlatform { package: String, platform: String },

    #[error("unknown package: {name}")]
    UnknownPackage { name: String },

    #[error("packaging failed: {message}")]
    PackagingFailed { message: String },
}

impl UserFacingError for BuildError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::MissingSourceDir { .. } | Self::SourceDirNotFound { .. } => {
                Some("Unpack the source tarball under _source/ or pass --with-<pkg>-sources.")
            }
            Self::MissingTool { .. } => {
                Some("Install the missing build tool and make sure it is on PATH.")
            }
            Self::UnknownPackage { .. } => Some("Valid packages are: icu, qt, sip, pyqt."),
            _ => None,
        }
    }
}
