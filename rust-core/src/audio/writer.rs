//! WAV export via hound
//!
//! Writes the filtered signal as 16-bit PCM at the source sample rate.

use std::path::Path;

use super::signal::Signal;
use super::AudioError;

/// Write a signal to disk as a mono 16-bit PCM WAV file
///
/// # Arguments
/// * `signal` - Signal to export; samples outside [-1, 1] are clamped
/// * `path` - Destination path
pub fn save_wav(signal: &Signal, path: &Path) -> Result<(), AudioError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: signal.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer =
        hound::WavWriter::create(path, spec).map_err(|e| AudioError::Write(e.to_string()))?;

    for &sample in &signal.samples {
        let clamped = sample.clamp(-1.0, 1.0);
        let quantized = (clamped * i16::MAX as f64).round() as i16;
        writer
            .write_sample(quantized)
            .map_err(|e| AudioError::Write(e.to_string()))?;
    }

    writer
        .finalize()
        .map_err(|e| AudioError::Write(e.to_string()))?;

    log::info!(
        "wrote {} samples at {} Hz to {}",
        signal.len(),
        signal.sample_rate,
        path.display()
    );

    Ok(())
}
