//! Murmur - CLI for transcribing large audio and video files.

pub mod cli;
pub mod model;
pub mod run;
