//! ICU build recipe
//!
//! ICU is only built from source where no usable system copy exists
//! (macOS, Windows), and always in release mode; nobody debugs ICU here.

use async_trait::async_trait;

use super::{Recipe, RecipeContext};
use crate::exec::{make, run_logged};
use qpsdk_errors::{BuildError, Error, Result};

pub struct IcuRecipe;

#[async_trait]
impl Recipe for IcuRecipe {
    fn name(&self) -> &'static str {
        "icu"
    }

    async fn build(&self, ctx: &RecipeContext<'_>) -> Result<()> {
        let src = ctx.source_dir.join("source");

        match std::env::consts::OS {
            "macos" => {
                let prefix = format!("--prefix={}", ctx.layout.root().display());

                run_logged(
                    "chmod",
                    &["+x", "configure", "runConfigureICU"],
                    &src,
                    ctx.env,
                )
                .await?;
                run_logged(
                    "bash",
                    &[
                        "runConfigureICU",
                        "MacOSX",
                        &prefix,
                        "--disable-debug",
                        "--enable-release",
                    ],
                    &src,
                    ctx.env,
                )
                .await?;
                make(&[], &src, ctx.env).await?;
                make(&["install"], &src, ctx.env).await
            }
            "windows" => {
                let prefix = format!(
                    "--prefix={}",
                    cygwin_path(&ctx.layout.root().display().to_string())
                );

                run_logged(
                    "bash",
                    &[
                        "runConfigureICU",
                        "Cygwin/MSVC",
                        &prefix,
                        "--disable-debug",
                        "--enable-release",
                    ],
                    &src,
                    ctx.env,
                )
                .await?;
                // ICU's Cygwin build needs GNU make, not nmake.
                run_logged("bash", &["-c", "make"], &src, ctx.env).await?;
                run_logged("bash", &["-c", "make install"], &src, ctx.env).await
            }
            other => Err(Error::Build(BuildError::UnsupportedPlatform {
                package: "icu".to_string(),
                platform: other.to_string(),
            })),
        }
    }
}

/// Convert a native Windows path to the form Cygwin's configure accepts
/// (e.g. `C:\foo\bar` becomes `/cygdrive/c/foo/bar`).
fn cygwin_path(native: &str) -> String {
    native.replace('\\', "/").replace("C:/", "/cygdrive/c/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_windows_paths_for_cygwin() {
        assert_eq!(
            cygwin_path(r"C:\sdk\qt-out"),
            "/cygdrive/c/sdk/qt-out"
        );
    }
}
