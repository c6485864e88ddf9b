//! Whisper implementation of the speech engine, via whisper-rs.

use crate::audio::read_mono_f32;
use crate::engine::{SpeechEngine, TimedSpan};
use crate::error::EngineError;
use std::path::{Path, PathBuf};
use std::sync::Once;
use whisper_rs::{
    FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters, install_logging_hooks,
};

static LOGGING_HOOKS_INSTALLED: Once = Once::new();

/// Default recognition language.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Configuration for the Whisper engine.
#[derive(Clone, Debug)]
pub struct WhisperConfig {
    /// Path to the GGML model file
    pub model_path: PathBuf,
    /// Fixed recognition language (e.g. "en")
    pub language: String,
    /// Inference threads per call (None = whisper.cpp default)
    pub threads: Option<usize>,
}

impl Default for WhisperConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/ggml-base.bin"),
            language: DEFAULT_LANGUAGE.to_string(),
            threads: None,
        }
    }
}

/// Speech engine backed by whisper.cpp.
///
/// The model is loaded once and shared immutably across worker threads;
/// each transcription call creates its own decoding state, so concurrent
/// calls on distinct files are independent.
pub struct WhisperEngine {
    context: WhisperContext,
    config: WhisperConfig,
}

impl std::fmt::Debug for WhisperEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhisperEngine")
            .field("config", &self.config)
            .field("context", &"<WhisperContext>")
            .finish()
    }
}

impl WhisperEngine {
    /// Load the model named in `config`.
    pub fn new(config: WhisperConfig) -> Result<Self, EngineError> {
        // Route whisper.cpp's own stderr chatter through tracing (once)
        LOGGING_HOOKS_INSTALLED.call_once(install_logging_hooks);

        if !config.model_path.exists() {
            return Err(EngineError::ModelNotFound(config.model_path.clone()));
        }

        let model_path = config
            .model_path
            .to_str()
            .ok_or_else(|| EngineError::ModelPath(config.model_path.clone()))?;

        tracing::info!(model = ?config.model_path.display(), "loading whisper model");
        let context =
            WhisperContext::new_with_params(model_path, WhisperContextParameters::default())?;

        Ok(Self { context, config })
    }

    fn params(&self) -> FullParams<'_, '_> {
        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_language(Some(&self.config.language));
        if let Some(threads) = self.config.threads {
            params.set_n_threads(threads as i32);
        }
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params
    }
}

impl SpeechEngine for WhisperEngine {
    fn transcribe_timed(&self, path: &Path) -> Result<Vec<TimedSpan>, EngineError> {
        tracing::info!(path = ?path.display(), "starting transcription");

        let audio = read_mono_f32(path)?;

        let mut state = self.context.create_state()?;
        state.full(self.params(), &audio)?;

        let spans = state
            .as_iter()
            .map(|segment| TimedSpan {
                text: segment.to_string(),
                // whisper.cpp timestamps are in centiseconds
                start: segment.start_timestamp() as f32 / 100.0,
                end: segment.end_timestamp() as f32 / 100.0,
            })
            .collect();

        Ok(spans)
    }
}
