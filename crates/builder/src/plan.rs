//! Build plan assembly
//!
//! Source directories are either passed explicitly or discovered by glob
//! under a sources directory. The plan is a fixed order: ICU (only where it
//! has to be built from source), Qt, SIP, PyQt; a package list on the
//! command line restricts it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use globset::Glob;
use regex::Regex;

use qpsdk_errors::{BuildError, Error, Result};

/// The packages this orchestrator knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Package {
    Icu,
    Qt,
    Sip,
    PyQt,
}

impl Package {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Icu => "icu",
            Self::Qt => "qt",
            Self::Sip => "sip",
            Self::PyQt => "pyqt",
        }
    }

    /// Glob pattern matching the package's unpacked source directory.
    #[must_use]
    pub fn source_pattern(self) -> &'static str {
        match self {
            Self::Icu => "icu*",
            Self::Qt => "qt-everywhere-*",
            Self::Sip => "sip-*",
            Self::PyQt => "PyQt-*",
        }
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Package {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "icu" => Ok(Self::Icu),
            "qt" => Ok(Self::Qt),
            "sip" => Ok(Self::Sip),
            "pyqt" => Ok(Self::PyQt),
            _ => Err(Error::Build(BuildError::UnknownPackage {
                name: s.to_string(),
            })),
        }
    }
}

/// One entry of the build plan.
#[derive(Debug, Clone)]
pub struct BuildStep {
    pub package: Package,
    pub source_dir: PathBuf,
    pub version: String,
}

/// Resolved source directories, explicit flags layered over discovery.
#[derive(Debug, Clone, Default)]
pub struct SourceSet {
    pub icu: Option<PathBuf>,
    pub qt: Option<PathBuf>,
    pub sip: Option<PathBuf>,
    pub pyqt: Option<PathBuf>,
}

impl SourceSet {
    /// Fill every unset entry by globbing under `sources_dir`.
    #[must_use]
    pub fn discover_missing(mut self, sources_dir: &Path) -> Self {
        self.icu = self
            .icu
            .or_else(|| discover_source(sources_dir, Package::Icu));
        self.qt = self.qt.or_else(|| discover_source(sources_dir, Package::Qt));
        self.sip = self
            .sip
            .or_else(|| discover_source(sources_dir, Package::Sip));
        self.pyqt = self
            .pyqt
            .or_else(|| discover_source(sources_dir, Package::PyQt));
        self
    }

    fn get(&self, package: Package) -> Option<&PathBuf> {
        match package {
            Package::Icu => self.icu.as_ref(),
            Package::Qt => self.qt.as_ref(),
            Package::Sip => self.sip.as_ref(),
            Package::PyQt => self.pyqt.as_ref(),
        }
    }
}

/// The ordered sequence of build steps for one run.
#[derive(Debug, Clone)]
pub struct BuildPlan {
    steps: Vec<BuildStep>,
}

impl BuildPlan {
    /// Assemble the default plan from resolved sources.
    ///
    /// `build_icu` is true on platforms without a usable system ICU
    /// (macOS, Windows).
    ///
    /// # Errors
    ///
    /// Returns an error when a required source directory is missing or its
    /// name carries no version.
    pub fn assemble(sources: &SourceSet, build_icu: bool) -> Result<Self> {
        let mut order = Vec::new();
        if build_icu {
            order.push(Package::Icu);
        }
        order.extend([Package::Qt, Package::Sip, Package::PyQt]);

        let mut steps = Vec::new();
        for package in order {
            let source_dir = sources.get(package).ok_or_else(|| {
                Error::Build(BuildError::MissingSourceDir {
                    package: package.to_string(),
                })
            })?;

            if !source_dir.is_dir() {
                return Err(Error::Build(BuildError::SourceDirNotFound {
                    package: package.to_string(),
                    path: source_dir.display().to_string(),
                }));
            }

            steps.push(BuildStep {
                package,
                version: extract_version(source_dir)?,
                source_dir: source_dir.clone(),
            });
        }

        Ok(Self { steps })
    }

    /// Restrict the plan to the given packages, preserving order.
    #[must_use]
    pub fn filter(self, selected: &[Package]) -> Self {
        if selected.is_empty() {
            return self;
        }
        Self {
            steps: self
                .steps
                .into_iter()
                .filter(|s| selected.contains(&s.package))
                .collect(),
        }
    }

    #[must_use]
    pub fn steps(&self) -> &[BuildStep] {
        &self.steps
    }

    /// Version of a planned package, if it is part of the plan.
    #[must_use]
    pub fn version_of(&self, package: Package) -> Option<&str> {
        self.steps
            .iter()
            .find(|s| s.package == package)
            .map(|s| s.version.as_str())
    }
}

/// First directory under `sources_dir` matching the package's glob.
#[must_use]
pub fn discover_source(sources_dir: &Path, package: Package) -> Option<PathBuf> {
    let matcher = Glob::new(package.source_pattern()).ok()?.compile_matcher();

    let mut candidates: Vec<PathBuf> = std::fs::read_dir(sources_dir)
        .ok()?
        .filter_map(std::result::Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_dir() && p.file_name().is_some_and(|n| matcher.is_match(n)))
        .collect();

    candidates.sort();
    candidates.into_iter().next()
}

/// Extract the single `X.Y.Z` version embedded in a source directory name.
///
/// # Errors
///
/// Returns [`BuildError::VersionNotFound`] unless the name contains exactly
/// one version-shaped substring.
pub fn extract_version(source_dir: &Path) -> Result<String> {
    let version = Regex::new(r"\d+\.\d+\.\d+").unwrap();
    let name = source_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut found = version.find_iter(&name);
    match (found.next(), found.next()) {
        (Some(m), None) => Ok(m.as_str().to_string()),
        _ => Err(Error::Build(BuildError::VersionNotFound {
            path: source_dir.display().to_string(),
        })),
    }
}
