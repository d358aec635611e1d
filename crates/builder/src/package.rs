//! SDK archive creation
//!
//! The finished install root is packed as `<basename>.tar.gz` with the
//! basename as the top-level archive entry, so unpacking anywhere yields a
//! self-contained SDK directory. The orchestrator binary itself is copied
//! into the tree first; an unpacked SDK can run its own setup with no
//! other tooling.

use std::path::{Path, PathBuf};

use tokio::io::{AsyncWriteExt, BufReader};
use tracing::info;

use qpsdk_errors::{BuildError, Error, Result};
use qpsdk_layout::InstallLayout;

/// Copy the running orchestrator binary into `layout.bin()`.
///
/// # Errors
///
/// Returns an error when the executable path cannot be determined or the
/// copy fails.
pub async fn install_orchestrator(layout: &InstallLayout) -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let name = exe.file_name().ok_or_else(|| {
        Error::Build(BuildError::PackagingFailed {
            message: format!("executable path {} has no basename", exe.display()),
        })
    })?;

    let target = layout.bin().join(name);
    tokio::fs::copy(&exe, &target)
        .await
        .map_err(|e| Error::io_with_path(&e, &target))?;
    Ok(target)
}

/// Create `output_path` as a gzip-compressed tar of `install_root`.
///
/// # Errors
///
/// Returns an error if the install root is unusable or any I/O step fails.
pub async fn archive_sdk(install_root: &Path, output_path: &Path) -> Result<PathBuf> {
    let basename = install_root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            Error::Build(BuildError::PackagingFailed {
                message: format!("install root {} has no basename", install_root.display()),
            })
        })?;

    info!(
        root = %install_root.display(),
        archive = %output_path.display(),
        "packaging SDK"
    );

    // Plain tar first; the tar crate is synchronous, so it runs on a
    // blocking thread.
    let mut tar_name = output_path.as_os_str().to_owned();
    tar_name.push(".tar");
    let tar_path = PathBuf::from(tar_name);
    {
        let tar_path = tar_path.clone();
        let install_root = install_root.to_path_buf();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let file = std::fs::File::create(&tar_path)?;
            let mut builder = tar::Builder::new(file);
            builder.follow_symlinks(false);
            builder.append_dir_all(&basename, &install_root)?;
            builder.finish()?;
            Ok(())
        })
        .await
        .map_err(|e| {
            Error::Build(BuildError::PackagingFailed {
                message: format!("tar creation task failed: {e}"),
            })
        })??;
    }

    // Then gzip the tar stream into the final archive.
    let compress = async {
        use async_compression::tokio::write::GzipEncoder;

        let input = tokio::fs::File::open(&tar_path).await?;
        let output = tokio::fs::File::create(output_path).await?;

        let mut encoder = GzipEncoder::new(output);
        let mut reader = BufReader::new(input);
        tokio::io::copy(&mut reader, &mut encoder).await?;
        encoder.shutdown().await?;
        Ok::<(), Error>(())
    }
    .await;

    // The intermediate tar is scratch either way.
    let _ = tokio::fs::remove_file(&tar_path).await;
    compress?;

    Ok(output_path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn orchestrator_binary_lands_in_bin() {
        use qpsdk_layout::PythonVersion;

        let dir = tempfile::tempdir().unwrap();
        let layout = InstallLayout::resolve(dir.path(), PythonVersion::new(3, 9)).unwrap();
        layout.create_skeleton().await.unwrap();

        let installed = install_orchestrator(&layout).await.unwrap();

        assert_eq!(installed.parent(), Some(layout.bin()));
        assert_eq!(
            installed.file_name(),
            std::env::current_exe().unwrap().file_name()
        );
        assert!(installed.is_file());
    }

    #[tokio::test]
    async fn archives_install_root_as_gzip() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("qt-sdk");
        std::fs::create_dir_all(root.join("bin")).unwrap();
        std::fs::write(root.join("bin/qmake"), b"#!/bin/sh\n").unwrap();

        let output = dir.path().join("qt-sdk.tar.gz");
        let created = archive_sdk(&root, &output).await.unwrap();
        assert_eq!(created, output);

        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(&bytes[..2], &[0x1f, 0x8b], "gzip magic");
        // Intermediate tar is cleaned up.
        assert!(!dir.path().join("qt-sdk.tar.gz.tar").exists());
    }

    #[tokio::test]
    async fn root_without_basename_is_rejected() {
        let out = std::env::temp_dir().join("qpsdk-bad.tar.gz");
        assert!(archive_sdk(Path::new("/"), &out).await.is_err());
    }
}
