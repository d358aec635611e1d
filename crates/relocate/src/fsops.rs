//! Read-modify-write plumbing for relocation
//!
//! A rewrite never truncates the original in place: the new contents go to
//! a temp file in the same directory, which then atomically replaces the
//! target. A failure partway through leaves the original untouched.

use std::path::Path;

use qpsdk_errors::{Error, RelocateError, Result};

pub(crate) fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        Error::Relocate(RelocateError::ReadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    })
}

pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let write_failed = |message: String| {
        Error::Relocate(RelocateError::WriteFailed {
            path: path.display().to_string(),
            message,
        })
    };

    let dir = path.parent().ok_or_else(|| {
        write_failed("target has no parent directory".to_string())
    })?;

    let tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| write_failed(e.to_string()))?;
    std::fs::write(tmp.path(), contents).map_err(|e| write_failed(e.to_string()))?;
    tmp.persist(path).map_err(|e| write_failed(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_atomic_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("file.txt");
        std::fs::write(&target, "old").unwrap();

        write_atomic(&target, "new").unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "new");
    }

    #[test]
    fn write_atomic_creates_missing_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("fresh.txt");

        write_atomic(&target, "hello").unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "hello");
    }

    #[test]
    fn write_atomic_fails_on_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("no/such/dir/file.txt");
        assert!(write_atomic(&target, "x").is_err());
    }
}
