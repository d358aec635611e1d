//! PyQt build recipe

use async_trait::async_trait;

use super::{orchestrator_path, push_debug_flags, Recipe, RecipeContext};
use crate::exec::{make, python_interpreter, run_logged};
use qpsdk_errors::Result;

/// Commercial license stub shipped next to the orchestrator binary.
const PYQT_LICENSE_FILE: &str = "pyqt-commercial.sip";

pub struct PyQtRecipe;

#[async_trait]
impl Recipe for PyQtRecipe {
    fn name(&self) -> &'static str {
        "pyqt"
    }

    async fn build(&self, ctx: &RecipeContext<'_>) -> Result<()> {
        let license = orchestrator_path(PYQT_LICENSE_FILE);
        if license.is_file() {
            tokio::fs::copy(&license, ctx.source_dir.join("sip").join(PYQT_LICENSE_FILE)).await?;
        }

        let sip_name = if cfg!(target_os = "windows") {
            "sip.exe"
        } else {
            "sip"
        };

        let mut args: Vec<String> = vec![
            "configure.py".to_string(),
            "--assume-shared".to_string(),
            "--bindir".to_string(),
            ctx.layout.bin().display().to_string(),
            "--concatenate".to_string(),
            "--concatenate-split=4".to_string(),
            "--confirm-license".to_string(),
            "--destdir".to_string(),
            ctx.layout.python().display().to_string(),
            "--no-designer-plugin".to_string(),
            "--no-docstrings".to_string(),
            "--no-sip-files".to_string(),
            format!("--sip={}", ctx.layout.bin().join(sip_name).display()),
            "--verbose".to_string(),
        ];
        push_debug_flags(ctx.debug, &mut args);

        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        run_logged(python_interpreter(), &arg_refs, ctx.source_dir, ctx.env).await?;
        make(&[], ctx.source_dir, ctx.env).await?;
        make(&["install"], ctx.source_dir, ctx.env).await
    }
}
