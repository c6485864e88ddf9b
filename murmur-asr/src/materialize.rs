//! Segment materialization: writing planned chunks to temporary WAV files.

use crate::audio::AudioSource;
use crate::chunk::Segment;
use crate::error::Result;
use hound::WavWriter;
use std::path::{Path, PathBuf};

/// A segment backed by an encoded temporary file.
///
/// Owned exclusively by one pipeline run; the run removes the file when
/// it finishes, whether or not transcription succeeded.
#[derive(Clone, Debug)]
pub struct MaterializedSegment {
    pub segment: Segment,
    pub path: PathBuf,
}

/// Write every segment of a plan to `dir` before any transcription starts.
///
/// File names derive from the segment ordinal (`chunk_<i>.wav`), so
/// concurrent writers can never collide. The caller owns `dir` and is
/// responsible for eventual deletion of its contents.
pub fn materialize_all(
    source: &AudioSource,
    segments: &[Segment],
    dir: &Path,
) -> Result<Vec<MaterializedSegment>> {
    let spec = source.spec();

    segments
        .iter()
        .map(|&segment| {
            let path = dir.join(format!("chunk_{}.wav", segment.index));
            tracing::debug!(
                chunk = segment.index,
                start_ms = segment.start_ms,
                end_ms = segment.end_ms,
                "writing chunk file"
            );

            let mut writer = WavWriter::create(&path, spec)?;
            for &sample in source.slice_ms(segment.start_ms, segment.end_ms) {
                writer.write_sample(sample)?;
            }
            writer.finalize()?;

            Ok(MaterializedSegment { segment, path })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::ChunkConfig;
    use hound::{SampleFormat, WavSpec};

    fn source_of_ms(total_ms: u64) -> AudioSource {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 1000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        // 1kHz mono: one sample per millisecond, sample value = its ms offset
        let samples: Vec<i16> = (0..total_ms).map(|i| (i % 1000) as i16).collect();
        AudioSource::from_samples(samples, spec)
    }

    #[test]
    fn writes_one_file_per_segment_named_by_ordinal() {
        let dir = tempfile::tempdir().unwrap();
        let source = source_of_ms(250);
        let segments = ChunkConfig::new(100).segments(source.duration_ms());

        let materialized = materialize_all(&source, &segments, dir.path()).unwrap();

        assert_eq!(materialized.len(), 3);
        for (i, m) in materialized.iter().enumerate() {
            assert_eq!(m.segment.index, i);
            assert_eq!(m.path, dir.path().join(format!("chunk_{i}.wav")));
            assert!(m.path.exists());
        }
    }

    #[test]
    fn chunk_files_carry_the_sliced_samples() {
        let dir = tempfile::tempdir().unwrap();
        let source = source_of_ms(250);
        let segments = ChunkConfig::new(100).segments(source.duration_ms());

        let materialized = materialize_all(&source, &segments, dir.path()).unwrap();

        let last = AudioSource::from_wav_file(&materialized[2].path).unwrap();
        assert_eq!(last.frames(), 50);
        assert_eq!(last.slice_ms(0, 1), &[200]);
        assert_eq!(last.spec().sample_rate, 1000);
    }

    #[test]
    fn empty_plan_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let source = source_of_ms(0);

        let materialized = materialize_all(&source, &[], dir.path()).unwrap();

        assert!(materialized.is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
