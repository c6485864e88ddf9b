//! Speech engine trait.

use crate::error::EngineError;
use std::path::Path;

/// A recognized span of speech with timestamps in seconds.
#[derive(Clone, Debug)]
pub struct TimedSpan {
    pub text: String,
    pub start: f32,
    pub end: f32,
}

/// One call, one independent result: transcribe the audio file at a path.
///
/// Implementations must be safe to invoke concurrently across distinct
/// files; workers share one engine immutably, so a loaded model is
/// amortized across all chunks of a run.
pub trait SpeechEngine: Send + Sync {
    /// Transcribe the whole file, returning recognized spans with timing.
    fn transcribe_timed(&self, path: &Path) -> Result<Vec<TimedSpan>, EngineError>;

    /// Transcribe the whole file to plain text.
    fn transcribe(&self, path: &Path) -> Result<String, EngineError> {
        let spans = self.transcribe_timed(path)?;
        let mut text = String::new();
        for span in &spans {
            text.push_str(&span.text);
        }
        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::error::AudioError;
    use std::time::Duration;

    /// Deterministic engine for pipeline and dispatcher tests.
    ///
    /// Echoes the file stem back as the transcript, fails for configured
    /// stems, and can stagger completion to scramble finish order.
    #[derive(Debug, Default)]
    pub(crate) struct StubEngine {
        pub fail_stems: Vec<String>,
        pub stagger: bool,
    }

    impl StubEngine {
        pub(crate) fn failing_on(stems: &[&str]) -> Self {
            Self {
                fail_stems: stems.iter().map(|s| s.to_string()).collect(),
                stagger: false,
            }
        }
    }

    impl SpeechEngine for StubEngine {
        fn transcribe_timed(&self, path: &Path) -> Result<Vec<TimedSpan>, EngineError> {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();

            if self.stagger {
                // Later chunks finish first
                let index: u64 = stem
                    .rsplit('_')
                    .next()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(0);
                std::thread::sleep(Duration::from_millis(30u64.saturating_sub(index * 5)));
            }

            if self.fail_stems.contains(&stem) {
                return Err(EngineError::Audio(AudioError::Io(std::io::Error::other(
                    format!("stub failure for {stem}"),
                ))));
            }

            Ok(vec![TimedSpan {
                text: format!("<{stem}>"),
                start: 0.0,
                end: 1.0,
            }])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SpanEngine(Vec<TimedSpan>);

    impl SpeechEngine for SpanEngine {
        fn transcribe_timed(&self, _path: &Path) -> Result<Vec<TimedSpan>, EngineError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn plain_text_joins_and_trims_spans() {
        // Whisper spans carry their own leading spaces
        let engine = SpanEngine(vec![
            TimedSpan {
                text: " Hello world.".into(),
                start: 0.0,
                end: 1.0,
            },
            TimedSpan {
                text: " How are you?".into(),
                start: 1.0,
                end: 2.0,
            },
        ]);

        let text = engine.transcribe(Path::new("any.wav")).unwrap();
        assert_eq!(text, "Hello world. How are you?");
    }

    #[test]
    fn plain_text_of_no_spans_is_empty() {
        let engine = SpanEngine(Vec::new());
        assert_eq!(engine.transcribe(Path::new("any.wav")).unwrap(), "");
    }
}
