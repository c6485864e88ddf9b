//! Transcription pipelines: single-shot and chunked-parallel.

use crate::assemble::{assemble, cleanup};
use crate::audio::AudioSource;
use crate::chunk::ChunkConfig;
use crate::dispatch::{DispatchConfig, dispatch};
use crate::engine::{SpeechEngine, TimedSpan};
use crate::error::{AudioError, Result};
use crate::materialize::materialize_all;
use std::path::Path;

/// Transcribe a whole file with one engine call.
pub fn transcribe_single(engine: &dyn SpeechEngine, wav: &Path) -> Result<String> {
    Ok(engine.transcribe(wav)?)
}

/// Transcribe a whole file, keeping per-span timing.
pub fn transcribe_single_timed(engine: &dyn SpeechEngine, wav: &Path) -> Result<Vec<TimedSpan>> {
    Ok(engine.transcribe_timed(wav)?)
}

/// Transcribe a large file by splitting it into chunks and transcribing
/// them in parallel.
///
/// Split → materialize (all chunks, into a run-scoped temp dir) →
/// dispatch → assemble. Chunk files are removed whether or not
/// transcription succeeded; on failure no transcript is returned and the
/// lowest-ordinal chunk error propagates.
pub fn transcribe_chunked(
    engine: &dyn SpeechEngine,
    wav: &Path,
    chunk_config: ChunkConfig,
    dispatch_config: &DispatchConfig,
) -> Result<String> {
    chunk_config.validate()?;

    let dir = tempfile::Builder::new()
        .prefix("murmur-chunks-")
        .tempdir()
        .map_err(AudioError::Io)?;

    let transcript = run_chunked(engine, wav, chunk_config, dispatch_config, dir.path())?;

    // TempDir drop removes the directory itself
    Ok(transcript)
}

/// Chunked pipeline against a caller-owned scratch directory.
pub(crate) fn run_chunked(
    engine: &dyn SpeechEngine,
    wav: &Path,
    chunk_config: ChunkConfig,
    dispatch_config: &DispatchConfig,
    dir: &Path,
) -> Result<String> {
    let source = AudioSource::from_wav_file(wav)?;
    let total_ms = source.duration_ms();

    let segments = chunk_config.segments(total_ms);
    if segments.is_empty() {
        tracing::info!("audio source is empty, nothing to transcribe");
        return Ok(String::new());
    }

    tracing::info!(
        total_ms,
        chunk_ms = chunk_config.duration_ms,
        chunks = segments.len(),
        "splitting audio into chunks"
    );

    let materialized = materialize_all(&source, &segments, dir)?;

    let outcome = dispatch(engine, &materialized, dispatch_config);
    cleanup(&materialized);

    Ok(assemble(outcome?))
}
