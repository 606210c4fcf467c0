use std::path::PathBuf;

use anyhow::{Context, bail};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CreateModelArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct CreateModelResponse {
    model: String,
    modelfile: PathBuf,
}

/// Handle `klara create-model`.
pub async fn handle(args: &CreateModelArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (name, modelfile) = resolve(args, ctx);
    if !modelfile.is_file() {
        bail!("modelfile '{}' does not exist", modelfile.display());
    }

    let status = klara_generate::create_model(&name, &modelfile)
        .await
        .context("failed to start ollama")?;
    if !status.success() {
        bail!("ollama create '{name}' failed ({status})");
    }

    output(&CreateModelResponse { model: name, modelfile }, flags.format)
}

/// Arguments win over config. A relative modelfile is taken from the search root.
fn resolve(args: &CreateModelArgs, ctx: &AppContext) -> (String, PathBuf) {
    let name = args.name.clone().unwrap_or_else(|| ctx.config.model.name.clone());
    let modelfile = args
        .modelfile
        .clone()
        .unwrap_or_else(|| PathBuf::from(&ctx.config.model.modelfile));
    let modelfile = if modelfile.is_relative() {
        ctx.root.join(modelfile)
    } else {
        modelfile
    };
    (name, modelfile)
}
