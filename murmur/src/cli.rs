//! CLI argument definitions using clap.

use eyre::Result;
use murmur_asr::chunk::ChunkConfig;
use murmur_asr::dispatch::DispatchConfig;
use murmur_asr::input::DEFAULT_THRESHOLD_MB;
use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
#[command(name = "murmur")]
#[command(about = "Transcribe audio and video files with Whisper")]
#[command(version)]
pub struct Cli {
    /// Path to the audio/video file (prompted on stdin when omitted)
    pub path: Option<PathBuf>,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Recognition language
    #[arg(long, default_value = murmur_asr::whisper::DEFAULT_LANGUAGE)]
    pub language: String,

    /// File size threshold in MB above which the chunked path is used
    #[arg(long, default_value_t = DEFAULT_THRESHOLD_MB)]
    pub threshold_mb: u64,

    #[command(flatten)]
    pub chunk: ChunkConfig,

    #[command(flatten)]
    pub dispatch: DispatchConfig,

    /// Write timestamped lines instead of plain text (single-shot path only)
    #[arg(long)]
    pub timestamps: bool,
}

/// Whisper model selection.
#[derive(Debug, clap::Args)]
pub struct ModelArgs {
    /// Local GGML model path, or a file name to fetch from the hub repo
    #[arg(long, default_value = "ggml-base.bin")]
    pub model: String,
}

/// Execute CLI command - separated for testing.
pub fn run_cli(cli: Cli) -> Result<()> {
    tracing::debug!(?cli, "parsed arguments");

    crate::run::execute(cli.try_into()?)
}
