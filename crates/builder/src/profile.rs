//! Build profile loading
//!
//! A profile is a JSON document mapping package names to configure
//! arguments, with a `common` list and optional per-platform lists:
//!
//! ```json
//! {
//!     "qt": {
//!         "common": ["-nomake", "examples"],
//!         "darwin": ["-no-framework"],
//!         "linux": ["-qt-xcb"]
//!     }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::plan::Package;
use qpsdk_errors::{Error, ProfileError, Result};

/// Per-package configure arguments keyed by platform.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageProfile {
    /// Arguments applied on every platform.
    #[serde(default)]
    common: Vec<String>,

    /// Platform-specific arguments (`linux` / `darwin` / `windows`).
    #[serde(flatten)]
    platforms: HashMap<String, Vec<String>>,
}

/// Configure arguments for the whole build, loaded from a JSON file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildProfile {
    #[serde(flatten)]
    packages: HashMap<String, PackageProfile>,
}

impl BuildProfile {
    /// Load a profile from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError`] if the file cannot be read or is not valid
    /// profile JSON.
    pub async fn load(path: &Path) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::Profile(ProfileError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        })?;

        Self::parse(&contents)
    }

    /// Parse a profile from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Parse`] on malformed JSON.
    pub fn parse(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).map_err(|e| {
            Error::Profile(ProfileError::Parse {
                message: e.to_string(),
            })
        })
    }

    /// Configure arguments for `package` on `platform`: the `common` list
    /// followed by the platform list.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::MissingPackage`] when the profile has no
    /// section for the package.
    pub fn args_for(&self, package: Package, platform: &str) -> Result<Vec<String>> {
        let section = self.packages.get(package.as_str()).ok_or_else(|| {
            Error::Profile(ProfileError::MissingPackage {
                package: package.to_string(),
            })
        })?;

        let mut args = section.common.clone();
        if let Some(platform_args) = section.platforms.get(platform) {
            args.extend(platform_args.iter().cloned());
        }
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE: &str = r#"
    {
        "qt": {
            "common": ["-nomake", "examples"],
            "darwin": ["-no-framework"],
            "linux": ["-qt-xcb"]
        }
    }
    "#;

    #[test]
    fn merges_common_and_platform_args() {
        let profile = BuildProfile::parse(PROFILE).unwrap();
        let args = profile.args_for(Package::Qt, "linux").unwrap();
        assert_eq!(args, vec!["-nomake", "examples", "-qt-xcb"]);
    }

    #[test]
    fn unknown_platform_gets_common_only() {
        let profile = BuildProfile::parse(PROFILE).unwrap();
        let args = profile.args_for(Package::Qt, "windows").unwrap();
        assert_eq!(args, vec!["-nomake", "examples"]);
    }

    #[test]
    fn missing_package_section_is_an_error() {
        let profile = BuildProfile::parse(PROFILE).unwrap();
        assert!(profile.args_for(Package::Sip, "linux").is_err());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(BuildProfile::parse("{not json").is_err());
    }
}
