//! SIP build recipe
//!
//! SIP's configure.py takes the install directories straight from the
//! layout; the generated sipconfig.py records them and is patched again at
//! relocation time.

use async_trait::async_trait;

use super::{push_debug_flags, Recipe, RecipeContext};
use crate::exec::{make, python_interpreter, run_logged};
use qpsdk_errors::Result;

pub struct SipRecipe;

#[async_trait]
impl Recipe for SipRecipe {
    fn name(&self) -> &'static str {
        "sip"
    }

    async fn build(&self, ctx: &RecipeContext<'_>) -> Result<()> {
        let mut args: Vec<String> = vec![
            "configure.py".to_string(),
            "--bindir".to_string(),
            ctx.layout.bin().display().to_string(),
            "--destdir".to_string(),
            ctx.layout.python().display().to_string(),
            "--incdir".to_string(),
            ctx.layout.include().display().to_string(),
            "--sipdir".to_string(),
            ctx.layout.sip().display().to_string(),
        ];
        push_debug_flags(ctx.debug, &mut args);

        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        run_logged(python_interpreter(), &arg_refs, ctx.source_dir, ctx.env).await?;
        make(&[], ctx.source_dir, ctx.env).await?;
        make(&["install"], ctx.source_dir, ctx.env).await
    }
}
