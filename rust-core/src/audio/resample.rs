//! Sample-rate conversion using rubato
//!
//! Mono sinc resampling for the loader's explicit-rate path.

use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

use super::AudioError;

/// Input block size fed to the resampler
const CHUNK_SIZE: usize = 1024;

/// Resample a mono buffer from one rate to another
///
/// # Arguments
/// * `samples` - Input samples
/// * `from_rate` - Source sample rate in Hz
/// * `to_rate` - Target sample rate in Hz
///
/// # Returns
/// Resampled buffer of approximately `len * to_rate / from_rate` samples
pub fn resample(samples: &[f64], from_rate: u32, to_rate: u32) -> Result<Vec<f64>, AudioError> {
    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let ratio = to_rate as f64 / from_rate as f64;

    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let mut resampler = SincFixedIn::<f64>::new(ratio, 2.0, params, CHUNK_SIZE, 1)
        .map_err(|e| AudioError::Resample(e.to_string()))?;

    let expected = (samples.len() as f64 * ratio).round() as usize;
    let mut output = Vec::with_capacity(expected + CHUNK_SIZE);

    let mut pos = 0;
    while samples.len() - pos >= CHUNK_SIZE {
        let chunk: &[&[f64]] = &[&samples[pos..pos + CHUNK_SIZE]];
        let frames = resampler
            .process(chunk, None)
            .map_err(|e| AudioError::Resample(e.to_string()))?;
        output.extend_from_slice(&frames[0]);
        pos += CHUNK_SIZE;
    }

    // Tail shorter than one chunk, then drain the resampler's internal buffer
    if pos < samples.len() {
        let tail: &[&[f64]] = &[&samples[pos..]];
        let frames = resampler
            .process_partial(Some(tail), None)
            .map_err(|e| AudioError::Resample(e.to_string()))?;
        output.extend_from_slice(&frames[0]);
    }

    let flush: Option<&[&[f64]]> = None;
    let frames = resampler
        .process_partial(flush, None)
        .map_err(|e| AudioError::Resample(e.to_string()))?;
    output.extend_from_slice(&frames[0]);

    if output.len() > expected {
        output.truncate(expected);
    }

    log::debug!(
        "resampled {} samples at {} Hz to {} samples at {} Hz",
        samples.len(),
        from_rate,
        output.len(),
        to_rate
    );

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_rate_is_identity() {
        let samples = vec![0.25; 100];
        let out = resample(&samples, 44100, 44100).unwrap();
        assert_eq!(out, samples);
    }

    #[test]
    fn test_downsample_halves_length() {
        let samples = vec![0.5; 44100];
        let out = resample(&samples, 44100, 22050).unwrap();

        // Within a few frames of the ideal length
        let expected = 22050;
        assert!(
            (out.len() as i64 - expected as i64).abs() < 256,
            "unexpected length {}",
            out.len()
        );
    }

    #[test]
    fn test_dc_level_preserved() {
        let samples = vec![0.5; 44100];
        let out = resample(&samples, 44100, 48000).unwrap();

        // Check the steady-state region away from the edges
        let mid = &out[out.len() / 4..out.len() / 2];
        for &s in mid {
            assert!((s - 0.5).abs() < 1e-2, "sample {} drifted from 0.5", s);
        }
    }
}
