//! Python version naming the versioned bindings directory

use std::fmt;
use std::str::FromStr;

use qpsdk_errors::{Error, LayoutError};

/// Major.minor version of the Python interpreter the bindings target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PythonVersion {
    major: u8,
    minor: u8,
}

impl PythonVersion {
    #[must_use]
    pub fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    /// Name of the bindings directory under the install root.
    #[must_use]
    pub fn dir_name(self) -> String {
        format!("python{}.{}", self.major, self.minor)
    }
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for PythonVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            Error::Layout(LayoutError::InvalidPythonVersion {
                value: s.to_string(),
            })
        };

        let (major, minor) = s.trim().split_once('.').ok_or_else(invalid)?;
        // Ignore a patch component ("3.9.18" names the same bindings dir)
        let minor = minor.split('.').next().unwrap_or(minor);

        Ok(Self {
            major: major.parse().map_err(|_| invalid())?,
            minor: minor.parse().map_err(|_| invalid())?,
        })
    }
}
