#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Install layout resolution for the qpsdk SDK tree
//!
//! An SDK installation is a root directory with a fixed set of named
//! subdirectories (executables, headers, libraries, Qt plugins, Python
//! bindings, SIP files). [`InstallLayout`] derives all of them from the
//! root once and is passed around immutably for the rest of the run.

mod environment;
mod python;

pub use environment::SdkEnvironment;
pub use python::PythonVersion;

use std::path::{Path, PathBuf};

use qpsdk_errors::{Error, LayoutError, Result};
use tracing::warn;

/// Logical role of a directory inside the SDK tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SdkRole {
    /// Installation root
    Root,
    /// Executables
    Bin,
    /// C/C++ headers
    Include,
    /// Libraries
    Lib,
    /// Qt plugins
    Plugins,
    /// Python bindings (versioned directory)
    Python,
    /// SIP specification files
    Sip,
}

impl SdkRole {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Bin => "bin",
            Self::Include => "include",
            Self::Lib => "lib",
            Self::Plugins => "plugins",
            Self::Python => "python",
            Self::Sip => "sip",
        }
    }
}

/// Immutable mapping from [`SdkRole`] to absolute directory path.
///
/// Every derived path is a descendant of `root`. Resolution is a pure
/// function of the root path and the Python version; it performs no I/O.
/// Use [`InstallLayout::verify`] for the (non-fatal) existence checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    root: PathBuf,
    bin: PathBuf,
    include: PathBuf,
    lib: PathBuf,
    plugins: PathBuf,
    python: PathBuf,
    sip: PathBuf,
}

impl InstallLayout {
    /// Resolve the layout for `install_root`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidRoot`] if the root cannot be made
    /// absolute. Missing directories are not an error.
    pub fn resolve(install_root: &Path, python: PythonVersion) -> Result<Self> {
        if install_root.as_os_str().is_empty() {
            return Err(Error::Layout(LayoutError::InvalidRoot {
                root: String::new(),
                reason: "empty path".to_string(),
            }));
        }

        let root = std::path::absolute(install_root).map_err(|e| {
            Error::Layout(LayoutError::InvalidRoot {
                root: install_root.display().to_string(),
                reason: e.to_string(),
            })
        })?;

        Ok(Self {
            bin: root.join("bin"),
            include: root.join("include"),
            lib: root.join("lib"),
            plugins: root.join("plugins"),
            python: root.join(python.dir_name()),
            sip: root.join("share").join("sip"),
            root,
        })
    }

    /// Installation root
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Executable directory (`<root>/bin`)
    #[must_use]
    pub fn bin(&self) -> &Path {
        &self.bin
    }

    /// Header directory (`<root>/include`)
    #[must_use]
    pub fn include(&self) -> &Path {
        &self.include
    }

    /// Library directory (`<root>/lib`)
    #[must_use]
    pub fn lib(&self) -> &Path {
        &self.lib
    }

    /// Qt plugin directory (`<root>/plugins`)
    #[must_use]
    pub fn plugins(&self) -> &Path {
        &self.plugins
    }

    /// Python bindings directory (`<root>/python<MAJ>.<MIN>`)
    #[must_use]
    pub fn python(&self) -> &Path {
        &self.python
    }

    /// SIP files directory (`<root>/share/sip`)
    #[must_use]
    pub fn sip(&self) -> &Path {
        &self.sip
    }

    /// All role/path pairs, root first.
    #[must_use]
    pub fn dirs(&self) -> [(SdkRole, &Path); 7] {
        [
            (SdkRole::Root, self.root.as_path()),
            (SdkRole::Bin, self.bin.as_path()),
            (SdkRole::Include, self.include.as_path()),
            (SdkRole::Lib, self.lib.as_path()),
            (SdkRole::Plugins, self.plugins.as_path()),
            (SdkRole::Python, self.python.as_path()),
            (SdkRole::Sip, self.sip.as_path()),
        ]
    }

    /// Path of the generated SIP configuration module, if present on disk
    /// it is patched during relocation.
    #[must_use]
    pub fn sip_config_file(&self) -> PathBuf {
        self.python.join("sipconfig.py")
    }

    /// Check that every derived directory (and the generated SIP config)
    /// exists. Missing entries are logged as warnings and returned; callers
    /// decide whether that is fatal for their step.
    pub fn verify(&self) -> Vec<PathBuf> {
        let mut missing = Vec::new();

        for (role, dir) in self.dirs() {
            if !dir.is_dir() {
                warn!(role = role.as_str(), path = %dir.display(), "missing SDK directory");
                missing.push(dir.to_path_buf());
            }
        }

        let sipconfig = self.sip_config_file();
        if !sipconfig.is_file() {
            warn!(path = %sipconfig.display(), "missing generated SIP configuration");
            missing.push(sipconfig);
        }

        missing
    }

    /// Create every layout directory that does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    pub async fn create_skeleton(&self) -> Result<()> {
        for (_, dir) in self.dirs() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| Error::io_with_path(&e, dir))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn py() -> PythonVersion {
        PythonVersion::new(3, 9)
    }

    #[test]
    fn resolve_derives_fixed_suffixes() {
        let layout = InstallLayout::resolve(Path::new("/opt/sdk"), py()).unwrap();
        assert_eq!(layout.bin(), Path::new("/opt/sdk/bin"));
        assert_eq!(layout.include(), Path::new("/opt/sdk/include"));
        assert_eq!(layout.lib(), Path::new("/opt/sdk/lib"));
        assert_eq!(layout.plugins(), Path::new("/opt/sdk/plugins"));
        assert_eq!(layout.python(), Path::new("/opt/sdk/python3.9"));
        assert_eq!(layout.sip(), Path::new("/opt/sdk/share/sip"));
    }

    #[test]
    fn resolve_is_deterministic() {
        let a = InstallLayout::resolve(Path::new("/opt/sdk"), py()).unwrap();
        let b = InstallLayout::resolve(Path::new("/opt/sdk"), py()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn every_path_is_a_descendant_of_root() {
        let layout = InstallLayout::resolve(Path::new("/opt/sdk"), py()).unwrap();
        for (_, dir) in layout.dirs() {
            assert!(dir.starts_with(layout.root()), "{}", dir.display());
        }
    }

    #[test]
    fn relative_roots_are_absolutized() {
        let layout = InstallLayout::resolve(Path::new("_out/sdk"), py()).unwrap();
        assert!(layout.root().is_absolute());
    }

    #[test]
    fn empty_root_is_rejected() {
        assert!(InstallLayout::resolve(Path::new(""), py()).is_err());
    }
}
