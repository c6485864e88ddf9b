//! ffmpeg front-end: audio extraction and format normalization.
//!
//! Both operations target the engine's canonical format, 16kHz mono
//! 16-bit PCM WAV. Non-zero exit from ffmpeg is fatal for the run.

use crate::error::MediaError;
use std::path::Path;
use std::process::{Command, Stdio};

const FFMPEG: &str = "ffmpeg";

/// Extract the audio track from a video file.
pub fn extract_audio(video: &Path, out: &Path) -> Result<(), MediaError> {
    tracing::info!(input = ?video.display(), output = ?out.display(), "extracting audio from video");

    let mut command = Command::new(FFMPEG);
    command.arg("-i").arg(video).arg("-vn");
    run_to_canonical_wav(command, out)
}

/// Convert an audio file to the engine's canonical format.
///
/// The reference pipeline converts every non-native input to a canonical
/// intermediate before transcribing, and output-file naming keys off the
/// converted file's stem, so this step is load-bearing rather than an
/// optimization target.
pub fn normalize_audio(input: &Path, out: &Path) -> Result<(), MediaError> {
    tracing::info!(input = ?input.display(), output = ?out.display(), "converting audio to 16kHz mono wav");

    let mut command = Command::new(FFMPEG);
    command.arg("-i").arg(input);
    run_to_canonical_wav(command, out)
}

fn run_to_canonical_wav(mut command: Command, out: &Path) -> Result<(), MediaError> {
    let status = command
        .args(["-ac", "1", "-ar", "16000", "-c:a", "pcm_s16le", "-y"])
        .arg(out)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|source| MediaError::Launch {
            tool: FFMPEG,
            source,
        })?;

    if !status.success() {
        return Err(MediaError::Failed {
            tool: FFMPEG,
            status,
        });
    }

    Ok(())
}
