//! murmur-asr: chunked parallel speech transcription on top of whisper.cpp.
//!
//! The core of the crate is the large-file pipeline: an [`AudioSource`] is
//! split into fixed-duration [`chunk::Segment`]s, each segment is
//! materialized to its own temporary WAV file, a scoped worker pool
//! transcribes the files concurrently through a shared [`engine::SpeechEngine`],
//! and the tagged fragments are reassembled into one transcript in
//! original chunk order.
//!
//! # Quick start
//!
//! ```ignore
//! use murmur_asr::chunk::ChunkConfig;
//! use murmur_asr::dispatch::DispatchConfig;
//! use murmur_asr::pipeline::transcribe_chunked;
//! use murmur_asr::whisper::{WhisperConfig, WhisperEngine};
//!
//! let engine = WhisperEngine::new(WhisperConfig::default())?;
//! let transcript = transcribe_chunked(
//!     &engine,
//!     "talk.wav".as_ref(),
//!     ChunkConfig::default(),
//!     &DispatchConfig::default(),
//! )?;
//! println!("{transcript}");
//! ```
//!
//! [`AudioSource`]: audio::AudioSource

pub mod assemble;
pub mod audio;
pub mod chunk;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod input;
pub mod materialize;
pub mod media;
pub mod pipeline;
pub mod whisper;

#[cfg(test)]
pub(crate) mod test_util;
