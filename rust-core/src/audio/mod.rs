//! Offline audio file I/O: decoding, resampling, and WAV export

use thiserror::Error;

pub mod loader;
pub mod resample;
pub mod signal;
pub mod writer;

pub use loader::{load, load_resampled};
pub use signal::Signal;
pub use writer::save_wav;

/// Errors raised while reading, converting, or writing audio files
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Failed to open audio file: {0}")]
    Open(String),

    #[error("Unrecognized or corrupt audio container: {0}")]
    Probe(String),

    #[error("Audio file contains no default track")]
    NoTrack,

    #[error("Audio track is missing a sample rate")]
    MissingSampleRate,

    #[error("Failed to decode audio packet: {0}")]
    Decode(String),

    #[error("Audio file produced no samples")]
    Empty,

    #[error("Resampling failed: {0}")]
    Resample(String),

    #[error("Failed to write WAV file: {0}")]
    Write(String),
}
