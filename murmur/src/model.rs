//! Whisper model resolution.
//!
//! `--model` accepts either a local GGML file path or the name of a file
//! in the whisper.cpp hub repository, which is then fetched (and cached)
//! via hf-hub.

use crate::cli::ModelArgs;
use eyre::{Context, Result};
use hf_hub::api::sync::Api;
use std::path::PathBuf;

const MODEL_REPO: &str = "ggerganov/whisper.cpp";

/// Resolve the model argument to a local file path.
pub fn resolve_model(args: &ModelArgs) -> Result<PathBuf> {
    let candidate = PathBuf::from(&args.model);
    if candidate.exists() {
        return Ok(candidate);
    }

    tracing::info!(file = args.model, repo = MODEL_REPO, "locating model");

    let api = Api::new()?;
    api.model(MODEL_REPO.to_string())
        .get(&args.model)
        .wrap_err_with(|| format!("failed to fetch model from hub: {}", args.model))
}
