//! Parallel dispatch of chunk transcriptions over a scoped worker pool.

use crate::assemble::TranscriptFragment;
use crate::engine::SpeechEngine;
use crate::error::{EngineError, Error, Result};
use crate::materialize::MaterializedSegment;
use std::thread;

/// Failure semantics for a chunked run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailureMode {
    /// Propagate the lowest-ordinal failure once all workers drain.
    ///
    /// Matches the reference behavior: in-flight chunks are never
    /// cancelled, and the first submitted failure wins.
    #[default]
    FailFast,

    /// Gather every failed chunk into one error.
    CollectAll,
}

/// Configuration for the dispatcher's worker pool.
#[derive(clap::Args, Clone, Copy, Debug, Default)]
pub struct DispatchConfig {
    /// Maximum concurrent transcription workers (default: one per chunk)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Report every failed chunk instead of only the first
    #[arg(long)]
    pub collect_errors: bool,
}

impl DispatchConfig {
    pub fn failure_mode(&self) -> FailureMode {
        if self.collect_errors {
            FailureMode::CollectAll
        } else {
            FailureMode::FailFast
        }
    }

    fn worker_count(&self, tasks: usize) -> usize {
        self.workers.unwrap_or(tasks).clamp(1, tasks)
    }
}

/// Transcribe every materialized segment concurrently.
///
/// Tasks are queued in ascending ordinal order and completion order is
/// unconstrained; each result is tagged with its segment ordinal so the
/// assembler can reorder. The pool is a scoped resource: all workers have
/// joined by the time this function returns.
pub fn dispatch(
    engine: &dyn SpeechEngine,
    segments: &[MaterializedSegment],
    config: &DispatchConfig,
) -> Result<Vec<TranscriptFragment>> {
    if segments.is_empty() {
        return Ok(Vec::new());
    }

    let workers = config.worker_count(segments.len());
    tracing::info!(chunks = segments.len(), workers, "dispatching chunk transcriptions");

    let (task_tx, task_rx) = crossbeam_channel::unbounded::<&MaterializedSegment>();
    for item in segments {
        // Receiver is alive until the scope ends
        let _ = task_tx.send(item);
    }
    drop(task_tx);

    let (done_tx, done_rx) = crossbeam_channel::unbounded();

    thread::scope(|scope| {
        for _ in 0..workers {
            let task_rx = task_rx.clone();
            let done_tx = done_tx.clone();
            scope.spawn(move || {
                while let Ok(item) = task_rx.recv() {
                    tracing::debug!(chunk = item.segment.index, "transcribing chunk");
                    let result = engine.transcribe(&item.path);
                    if done_tx.send((item.segment.index, result)).is_err() {
                        break;
                    }
                }
            });
        }
    });
    drop(done_tx);

    let mut fragments = Vec::with_capacity(segments.len());
    let mut failed: Vec<(usize, EngineError)> = Vec::new();

    for (index, result) in done_rx {
        match result {
            Ok(text) => fragments.push(TranscriptFragment { index, text }),
            Err(source) => failed.push((index, source)),
        }
    }

    if failed.is_empty() {
        return Ok(fragments);
    }

    failed.sort_by_key(|(index, _)| *index);
    match config.failure_mode() {
        FailureMode::FailFast => {
            let (index, source) = failed.remove(0);
            Err(Error::Chunk { index, source })
        }
        FailureMode::CollectAll => Err(Error::Chunks {
            failed,
            total: segments.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::Segment;
    use crate::engine::testing::StubEngine;
    use std::path::PathBuf;

    fn fake_segments(count: usize) -> Vec<MaterializedSegment> {
        (0..count)
            .map(|index| MaterializedSegment {
                segment: Segment {
                    index,
                    start_ms: index as u64 * 1000,
                    end_ms: (index as u64 + 1) * 1000,
                },
                path: PathBuf::from(format!("chunk_{index}.wav")),
            })
            .collect()
    }

    #[test]
    fn collects_fragments_tagged_by_ordinal() {
        let engine = StubEngine {
            stagger: true,
            ..StubEngine::default()
        };

        let mut fragments =
            dispatch(&engine, &fake_segments(6), &DispatchConfig::default()).unwrap();

        assert_eq!(fragments.len(), 6);
        fragments.sort_by_key(|f| f.index);
        for (i, fragment) in fragments.iter().enumerate() {
            assert_eq!(fragment.index, i);
            assert_eq!(fragment.text, format!("<chunk_{i}>"));
        }
    }

    #[test]
    fn bounded_pool_processes_every_task() {
        let engine = StubEngine::default();
        let config = DispatchConfig {
            workers: Some(2),
            collect_errors: false,
        };

        let fragments = dispatch(&engine, &fake_segments(7), &config).unwrap();
        assert_eq!(fragments.len(), 7);
    }

    #[test]
    fn fail_fast_reports_lowest_failed_ordinal() {
        let engine = StubEngine::failing_on(&["chunk_4", "chunk_1"]);

        let err = dispatch(&engine, &fake_segments(6), &DispatchConfig::default()).unwrap_err();

        match err {
            Error::Chunk { index, .. } => assert_eq!(index, 1),
            other => panic!("expected chunk error, got {other:?}"),
        }
    }

    #[test]
    fn collect_all_reports_every_failed_ordinal() {
        let engine = StubEngine::failing_on(&["chunk_0", "chunk_3"]);
        let config = DispatchConfig {
            workers: None,
            collect_errors: true,
        };

        let err = dispatch(&engine, &fake_segments(4), &config).unwrap_err();

        match err {
            Error::Chunks { failed, total } => {
                assert_eq!(total, 4);
                let indices: Vec<usize> = failed.iter().map(|(i, _)| *i).collect();
                assert_eq!(indices, vec![0, 3]);
            }
            other => panic!("expected chunks error, got {other:?}"),
        }
    }

    #[test]
    fn no_segments_is_no_work() {
        let engine = StubEngine::default();
        let fragments = dispatch(&engine, &[], &DispatchConfig::default()).unwrap();
        assert!(fragments.is_empty());
    }

    #[test]
    fn worker_count_is_capped_by_task_count() {
        let config = DispatchConfig {
            workers: Some(64),
            collect_errors: false,
        };
        assert_eq!(config.worker_count(3), 3);

        let config = DispatchConfig {
            workers: Some(0),
            collect_errors: false,
        };
        assert_eq!(config.worker_count(3), 1);

        assert_eq!(DispatchConfig::default().worker_count(5), 5);
    }
}
