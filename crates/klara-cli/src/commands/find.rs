use anyhow::Context;
use klara_parser::{find_class_with, find_function_with};
use tracing::warn;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SymbolArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `klara find-function`.
pub fn handle_function(args: &SymbolArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let found = find_function_with(&ctx.root, &args.name, &ctx.function_walk())
        .with_context(|| format!("failed to search {}", ctx.root.display()))?;
    if found.is_none() {
        warn!(function = %args.name, root = %ctx.root.display(), "function not found");
    }
    output(&found, flags.format)
}

/// Handle `klara find-class`.
pub fn handle_class(args: &SymbolArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let found = find_class_with(&ctx.root, &args.name, &ctx.class_walk())
        .with_context(|| format!("failed to search {}", ctx.root.display()))?;
    if found.is_none() {
        warn!(class = %args.name, root = %ctx.root.display(), "class not found");
    }
    output(&found, flags.format)
}
