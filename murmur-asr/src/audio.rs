//! Audio loading utilities.

use crate::error::{AudioError, Result};
use hound::{SampleFormat, WavReader, WavSpec};
use std::path::Path;

/// Sample rate the speech engine consumes (16kHz).
pub const SAMPLE_RATE: u32 = 16000;

/// A decoded in-memory audio stream with a known total duration.
///
/// Holds interleaved PCM samples plus the WAV spec they were read with.
/// Immutable once loaded; chunking slices it by millisecond offsets.
#[derive(Clone, Debug)]
pub struct AudioSource {
    samples: Vec<i16>,
    spec: WavSpec,
}

impl AudioSource {
    /// Create a source from raw interleaved samples.
    pub fn from_samples(samples: Vec<i16>, spec: WavSpec) -> Self {
        Self { samples, spec }
    }

    /// Load a source from a WAV file.
    ///
    /// Accepts 16-bit integer and 32-bit float sample formats; float
    /// samples are rescaled to i16.
    pub fn from_wav_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut reader = WavReader::open(path)?;
        let spec = reader.spec();

        let samples: Vec<i16> = match spec.sample_format {
            SampleFormat::Int => reader.samples::<i16>().collect::<hound::Result<_>>()?,
            SampleFormat::Float => reader
                .samples::<f32>()
                .map(|s| s.map(|s| (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16))
                .collect::<hound::Result<_>>()?,
        };

        let spec = WavSpec {
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
            ..spec
        };

        Ok(Self { samples, spec })
    }

    /// WAV spec the samples were decoded with.
    pub fn spec(&self) -> WavSpec {
        self.spec
    }

    /// Number of frames (samples per channel).
    pub fn frames(&self) -> u64 {
        self.samples.len() as u64 / self.spec.channels.max(1) as u64
    }

    /// Total duration in milliseconds, rounded up to cover the last frame.
    pub fn duration_ms(&self) -> u64 {
        (self.frames() * 1000).div_ceil(self.spec.sample_rate as u64)
    }

    /// Interleaved samples for the `[start_ms, end_ms)` time range.
    ///
    /// Offsets past the end of the stream are clamped, so the final chunk
    /// of a run may be shorter than requested but is never padded.
    pub fn slice_ms(&self, start_ms: u64, end_ms: u64) -> &[i16] {
        let start = self.sample_index(start_ms);
        let end = self.sample_index(end_ms).max(start);
        &self.samples[start..end]
    }

    fn sample_index(&self, ms: u64) -> usize {
        let frame = (ms * self.spec.sample_rate as u64 / 1000).min(self.frames());
        frame as usize * self.spec.channels as usize
    }
}

/// Read a WAV file as mono f32 samples at 16kHz.
///
/// Validates the sample rate and downmixes stereo to mono. This is the
/// format whisper.cpp expects, normalized to `[-1.0, 1.0]`.
pub fn read_mono_f32(path: impl AsRef<Path>) -> std::result::Result<Vec<f32>, AudioError> {
    let mut reader = WavReader::open(&path)?;
    let spec = reader.spec();

    if spec.sample_rate != SAMPLE_RATE {
        return Err(AudioError::InvalidSampleRate {
            expected: SAMPLE_RATE,
            got: spec.sample_rate,
        });
    }

    if spec.channels == 0 || spec.channels > 2 {
        return Err(AudioError::InvalidChannels(spec.channels));
    }

    let mut audio: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect::<hound::Result<_>>()?,
        SampleFormat::Int => reader
            .samples::<i16>()
            .map(|s| s.map(|s| s as f32 / 32768.0))
            .collect::<hound::Result<_>>()?,
    };

    if spec.channels == 2 {
        audio = audio
            .chunks(2)
            .map(|frame| frame.iter().sum::<f32>() / 2.0)
            .collect();
    }

    Ok(audio)
}

/// Check whether a WAV file is already in the engine's canonical format
/// (16kHz, mono, 16-bit integer samples).
///
/// Returns false for unreadable files; callers route those through the
/// ffmpeg front-end, which reports its own errors.
pub fn is_engine_ready_wav(path: impl AsRef<Path>) -> bool {
    match WavReader::open(path) {
        Ok(reader) => {
            let spec = reader.spec();
            spec.sample_rate == SAMPLE_RATE
                && spec.channels == 1
                && spec.bits_per_sample == 16
                && spec.sample_format == SampleFormat::Int
        }
        Err(_) => false,
    }
}
