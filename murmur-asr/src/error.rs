//! Error types for murmur-asr organized by processing stage.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Transcription pipeline error variants organized by processing stage.
#[derive(Debug, Error)]
pub enum Error {
    /// Input validation error, raised before any processing begins
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// External media tool error
    #[error(transparent)]
    Media(#[from] MediaError),

    /// Audio loading or encoding error
    #[error(transparent)]
    Audio(#[from] AudioError),

    /// Speech engine error for a whole-file transcription
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Speech engine error for one chunk of a chunked run
    #[error("transcription failed for chunk {index}: {source}")]
    Chunk { index: usize, source: EngineError },

    /// Speech engine errors collected across a whole chunked run
    #[error("transcription failed for {} of {total} chunks", failed.len())]
    Chunks {
        failed: Vec<(usize, EngineError)>,
        total: usize,
    },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Input path does not exist
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    /// Input extension is not in the accepted set
    #[error("unsupported format {0:?}: only MP3, MP4, WAV, and FLAC files are supported")]
    UnsupportedFormat(String),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Chunk duration must be positive
    #[error("invalid chunk duration: {0}ms")]
    InvalidChunkDuration(u64),
}

/// External tool (ffmpeg) errors.
#[derive(Debug, Error)]
pub enum MediaError {
    /// The tool could not be started
    #[error("failed to launch {tool}: {source}")]
    Launch {
        tool: &'static str,
        source: std::io::Error,
    },

    /// The tool ran and reported failure
    #[error("{tool} exited with {status}")]
    Failed {
        tool: &'static str,
        status: ExitStatus,
    },
}

/// Audio loading and validation errors.
#[derive(Debug, Error)]
pub enum AudioError {
    /// Sample rate validation failed
    #[error("invalid sample rate: expected {expected}Hz, got {got}Hz")]
    InvalidSampleRate { expected: u32, got: u32 },

    /// Channel count validation failed
    #[error("invalid channel count: expected mono or stereo, got {0} channels")]
    InvalidChannels(u16),

    /// IO error during audio handling
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// WAV file format error
    #[error(transparent)]
    Wav(#[from] hound::Error),
}

/// Speech engine errors (model loading and inference).
#[derive(Debug, Error)]
pub enum EngineError {
    /// Model file not found
    #[error("model file not found: {0}")]
    ModelNotFound(PathBuf),

    /// Model path cannot be passed to whisper.cpp
    #[error("model path is not valid UTF-8: {0}")]
    ModelPath(PathBuf),

    /// whisper.cpp error during load or inference
    #[error(transparent)]
    Whisper(#[from] whisper_rs::WhisperError),

    /// Audio decoding error inside the engine
    #[error(transparent)]
    Audio(#[from] AudioError),
}

/// Result type alias for murmur-asr operations.
pub type Result<T> = std::result::Result<T, Error>;

// Nested From implementations for automatic error conversion chains

// hound::Error → AudioError → Error
impl From<hound::Error> for Error {
    fn from(e: hound::Error) -> Self {
        Error::Audio(AudioError::Wav(e))
    }
}

// std::io::Error → AudioError → Error
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Audio(AudioError::Io(e))
    }
}
