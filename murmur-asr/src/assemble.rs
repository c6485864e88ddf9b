//! Transcript assembly and chunk-file cleanup.

use crate::materialize::MaterializedSegment;

/// The text result of transcribing one chunk, tagged with its ordinal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscriptFragment {
    pub index: usize,
    pub text: String,
}

/// Concatenate fragments into the final transcript.
///
/// Fragments are sorted by ascending ordinal, joined with a single space,
/// and trimmed. Completion order of the fragments is irrelevant; only the
/// ordinal determines transcript order.
pub fn assemble(mut fragments: Vec<TranscriptFragment>) -> String {
    fragments.sort_by_key(|fragment| fragment.index);

    fragments
        .iter()
        .map(|fragment| fragment.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Remove every chunk file, best-effort.
///
/// Runs on the success and failure paths alike; a deletion failure is
/// reported at warn level and never surfaced as an error, so it cannot
/// mask an earlier transcription failure.
pub fn cleanup(segments: &[MaterializedSegment]) {
    for item in segments {
        if let Err(error) = std::fs::remove_file(&item.path) {
            tracing::warn!(
                chunk = item.segment.index,
                path = ?item.path.display(),
                %error,
                "failed to remove chunk file"
            );
        }
    }
}
