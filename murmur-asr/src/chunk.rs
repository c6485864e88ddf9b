//! Chunk planning for splitting long audio into fixed-duration segments.

use crate::error::ConfigError;

/// Default chunk duration in milliseconds (1 minute).
pub const DEFAULT_CHUNK_MS: u64 = 60_000;

/// Configuration for audio chunking.
#[derive(clap::Args, Clone, Copy, Debug)]
pub struct ChunkConfig {
    /// Chunk duration in milliseconds for large files
    #[arg(long = "chunk-ms", default_value_t = DEFAULT_CHUNK_MS)]
    pub duration_ms: u64,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_CHUNK_MS,
        }
    }
}

impl ChunkConfig {
    /// Create a new chunk configuration.
    pub fn new(duration_ms: u64) -> Self {
        Self { duration_ms }
    }

    /// Reject configurations that cannot make progress.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.duration_ms == 0 {
            return Err(ConfigError::InvalidChunkDuration(self.duration_ms));
        }
        Ok(())
    }

    /// Create an iterator over the segments covering `[0, total_ms)`.
    ///
    /// Segments are produced in increasing-offset order. The final segment
    /// is shorter when `total_ms` is not a multiple of the chunk duration;
    /// a zero-duration source yields no segments.
    pub fn iter_segments(&self, total_ms: u64) -> SegmentIter {
        SegmentIter {
            total_ms,
            chunk_ms: self.duration_ms,
            position: 0,
            index: 0,
        }
    }

    /// Plan all segments covering `[0, total_ms)`.
    pub fn segments(&self, total_ms: u64) -> Vec<Segment> {
        self.iter_segments(total_ms).collect()
    }
}

/// A contiguous sub-range of an audio source.
///
/// Identified by its 0-based ordinal index and `[start_ms, end_ms)`
/// offsets. The ordinal index is the transcript's ordering key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub index: usize,
    pub start_ms: u64,
    pub end_ms: u64,
}

impl Segment {
    /// Segment length in milliseconds.
    pub fn len_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }
}

/// Iterator over the segments of a chunk plan.
pub struct SegmentIter {
    total_ms: u64,
    chunk_ms: u64,
    position: u64,
    index: usize,
}

impl Iterator for SegmentIter {
    type Item = Segment;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.total_ms {
            return None;
        }

        let start_ms = self.position;
        let end_ms = (start_ms + self.chunk_ms).min(self.total_ms);
        let index = self.index;

        self.position = end_ms;
        self.index += 1;

        Some(Segment {
            index,
            start_ms,
            end_ms,
        })
    }
}
