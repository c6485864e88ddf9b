//! Top-level transcription flow: validate, route, transcribe, write output.

use crate::cli::Cli;
use crate::model::resolve_model;
use color_eyre::Section;
use eyre::{Context, Result};
use murmur_asr::chunk::ChunkConfig;
use murmur_asr::dispatch::DispatchConfig;
use murmur_asr::engine::{SpeechEngine, TimedSpan};
use murmur_asr::pipeline::{transcribe_chunked, transcribe_single, transcribe_single_timed};
use murmur_asr::whisper::{WhisperConfig, WhisperEngine};
use murmur_asr::{audio, input, media};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Resolved configuration for one transcription run.
#[derive(Debug)]
pub struct RunConfig {
    pub input: Option<PathBuf>,
    pub model: crate::cli::ModelArgs,
    pub language: String,
    pub threshold_mb: u64,
    pub chunk: ChunkConfig,
    pub dispatch: DispatchConfig,
    pub timestamps: bool,
}

impl TryFrom<Cli> for RunConfig {
    type Error = eyre::Error;

    fn try_from(cli: Cli) -> Result<Self> {
        cli.chunk.validate()?;
        Ok(Self {
            input: cli.path,
            model: cli.model,
            language: cli.language,
            threshold_mb: cli.threshold_mb,
            chunk: cli.chunk,
            dispatch: cli.dispatch,
            timestamps: cli.timestamps,
        })
    }
}

pub fn execute(config: RunConfig) -> Result<()> {
    let input = match config.input {
        Some(path) => path,
        None => prompt_for_path()?,
    };

    // Validation happens before any processing, model download included
    input::validate(&input)?;

    let model_path = resolve_model(&config.model)?;
    let engine = WhisperEngine::new(WhisperConfig {
        model_path,
        language: config.language,
        threads: None,
    })?;

    let large = input::is_large(&input, config.threshold_mb)
        .wrap_err_with(|| format!("failed to stat input: {:?}", input.display()))?;

    let (transcript, output) = if large {
        tracing::warn!(
            threshold_mb = config.threshold_mb,
            "file is large, splitting into chunks for processing"
        );
        if config.timestamps {
            tracing::warn!("timestamps are only available on the single-shot path, ignoring");
        }

        let transcript = chunked_transcription(&engine, &input, config.chunk, &config.dispatch)?;
        (transcript, output_path_for(&input))
    } else {
        let working = prepare_working_file(&input)?;
        let transcript = if config.timestamps {
            format_timed(&transcribe_single_timed(&engine, &working)?)
        } else {
            transcribe_single(&engine, &working)?
        };
        (transcript, output_path_for(&working))
    };

    std::fs::write(&output, transcript)
        .wrap_err_with(|| format!("failed to write transcript: {:?}", output.display()))?;

    tracing::info!(
        output = ?output.display(),
        "transcription completed successfully"
    );

    Ok(())
}

/// Run the chunked pipeline, normalizing the input first when it is not
/// already in the engine's format.
///
/// The normalized intermediate lives in a run-scoped temp dir and is
/// removed with it; the output file is named after the original input.
fn chunked_transcription(
    engine: &dyn SpeechEngine,
    input: &Path,
    chunk: ChunkConfig,
    dispatch: &DispatchConfig,
) -> Result<String> {
    if audio::is_engine_ready_wav(input) {
        return Ok(transcribe_chunked(engine, input, chunk, dispatch)?);
    }

    let scratch = tempfile::Builder::new()
        .prefix("murmur-normalize-")
        .tempdir()
        .wrap_err("failed to create scratch directory")?;
    let wav = scratch.path().join(working_name(input, "_16k.wav"));

    media::normalize_audio(input, &wav)
        .wrap_err("failed to convert audio for transcription")
        .suggestion("ffmpeg must be installed and on PATH")?;

    Ok(transcribe_chunked(engine, &wav, chunk, dispatch)?)
}

/// Turn the input into a file the engine can consume directly.
///
/// Video inputs get their audio track extracted to `<stem>_temp.wav`;
/// audio in other formats is converted to `<stem>.wav`, keeping the
/// input stem so the output file name derives from it unchanged. A
/// `.wav` input that is not 16 kHz mono 16-bit is the one case that
/// needs a `_16k` suffix, since `<stem>.wav` is the input itself. An
/// input already in the engine's format is used as-is; conversion is
/// skipped only because the working stem, and with it the output
/// name, is identical either way.
fn prepare_working_file(input: &Path) -> Result<PathBuf> {
    match input::extension(input).as_deref() {
        Some("mp4") => {
            let out = input.with_file_name(working_name(input, "_temp.wav"));
            media::extract_audio(input, &out)
                .wrap_err("failed to extract audio from the video file")
                .suggestion("ffmpeg must be installed and on PATH")?;
            Ok(out)
        }
        Some("wav") if audio::is_engine_ready_wav(input) => Ok(input.to_path_buf()),
        _ => {
            let out = input.with_file_name(converted_name(input));
            media::normalize_audio(input, &out)
                .wrap_err("failed to convert audio for transcription")
                .suggestion("ffmpeg must be installed and on PATH")?;
            Ok(out)
        }
    }
}

/// Name for the normalized copy of a non-canonical audio input.
fn converted_name(input: &Path) -> String {
    match input::extension(input).as_deref() {
        Some("wav") => working_name(input, "_16k.wav"),
        _ => working_name(input, ".wav"),
    }
}

/// `<working-stem>_transcription.txt` beside the working file.
fn output_path_for(working: &Path) -> PathBuf {
    working.with_file_name(working_name(working, "_transcription.txt"))
}

fn working_name(path: &Path, suffix: &str) -> String {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();
    format!("{stem}{suffix}")
}

/// Render spans as `[<start>.<2dp> - <end>.<2dp>] <text>` lines.
fn format_timed(spans: &[TimedSpan]) -> String {
    spans
        .iter()
        .map(|span| {
            format!(
                "[{:.2} - {:.2}] {}\n",
                span.start,
                span.end,
                span.text.trim()
            )
        })
        .collect()
}

fn prompt_for_path() -> Result<PathBuf> {
    print!("Please enter the path to your audio/video file: ");
    std::io::stdout().flush().wrap_err("failed to flush prompt")?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .wrap_err("failed to read input path")?;

    Ok(PathBuf::from(line.trim()))
}
