//! Input validation and size-based routing.

use crate::error::ValidationError;
use std::path::Path;

/// Accepted input extensions, matched case-insensitively.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["mp3", "mp4", "wav", "flac"];

/// Default size threshold above which the chunked path is used.
pub const DEFAULT_THRESHOLD_MB: u64 = 100;

/// Lowercased extension of a path, if any.
pub fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Validate an input path before any processing begins.
pub fn validate(path: &Path) -> Result<(), ValidationError> {
    if !path.exists() {
        return Err(ValidationError::FileNotFound(path.to_path_buf()));
    }

    let ext = extension(path).unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(ValidationError::UnsupportedFormat(ext));
    }

    Ok(())
}

/// Whether the file size exceeds the chunked-path threshold.
pub fn is_large(path: &Path, threshold_mb: u64) -> std::io::Result<bool> {
    let size = std::fs::metadata(path)?.len();
    Ok(size > threshold_mb * 1024 * 1024)
}
