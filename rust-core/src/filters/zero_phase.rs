//! Zero-phase (forward-backward) filtering
//!
//! Runs the filter forward, reverses, runs it again, and reverses once more,
//! cancelling the phase distortion of a single pass. The signal is extended
//! on both ends with an odd reflection and the filter is started from its
//! steady state so edge transients stay out of the returned samples.

use super::design::{
    design_bandpass_butter, design_highpass_butter, design_lowpass_butter, IirCoefficients,
};
use super::iir::{lfilter_zi, IirFilter};
use super::FilterError;

/// Apply a filter with zero phase over the whole signal
///
/// # Arguments
/// * `coeffs` - Transfer-function coefficients
/// * `samples` - Input signal; must be longer than the edge padding of
///   `3 * max(len(b), len(a))` samples
///
/// # Returns
/// Filtered signal of identical length
pub fn filtfilt(coeffs: &IirCoefficients, samples: &[f64]) -> Result<Vec<f64>, FilterError> {
    let ntaps = coeffs.b.len().max(coeffs.a.len());
    let padlen = 3 * ntaps;
    let n = samples.len();

    if n <= padlen {
        return Err(FilterError::SignalTooShort { len: n, padlen });
    }

    // Odd extension on both ends: x[-i] = 2*x[0] - x[i]
    let mut extended = Vec::with_capacity(n + 2 * padlen);
    let first = samples[0];
    for i in (1..=padlen).rev() {
        extended.push(2.0 * first - samples[i]);
    }
    extended.extend_from_slice(samples);
    let last = samples[n - 1];
    for i in 1..=padlen {
        extended.push(2.0 * last - samples[n - 1 - i]);
    }

    let zi = lfilter_zi(coeffs);

    // Forward pass, starting from steady state scaled by the first sample
    let mut filter = IirFilter::new(coeffs);
    let scaled: Vec<f64> = zi.iter().map(|z| z * extended[0]).collect();
    filter.set_state(&scaled);
    let forward = filter.process_block(&extended);

    // Backward pass over the reversed signal
    let reversed: Vec<f64> = forward.into_iter().rev().collect();
    let mut filter = IirFilter::new(coeffs);
    let scaled: Vec<f64> = zi.iter().map(|z| z * reversed[0]).collect();
    filter.set_state(&scaled);
    let backward = filter.process_block(&reversed);

    let output: Vec<f64> = backward.into_iter().rev().collect();
    Ok(output[padlen..padlen + n].to_vec())
}

/// Zero-phase low-pass Butterworth filtering
///
/// # Arguments
/// * `samples` - Input signal
/// * `normal_cutoff` - Cutoff normalized to Nyquist, in (0, 1)
/// * `order` - Filter order
pub fn low_pass(
    samples: &[f64],
    normal_cutoff: f64,
    order: usize,
) -> Result<Vec<f64>, FilterError> {
    let coeffs = design_lowpass_butter(order, normal_cutoff)?;
    filtfilt(&coeffs, samples)
}

/// Zero-phase high-pass Butterworth filtering
pub fn high_pass(
    samples: &[f64],
    normal_cutoff: f64,
    order: usize,
) -> Result<Vec<f64>, FilterError> {
    let coeffs = design_highpass_butter(order, normal_cutoff)?;
    filtfilt(&coeffs, samples)
}

/// Zero-phase band-pass Butterworth filtering
///
/// # Arguments
/// * `samples` - Input signal
/// * `normal_cutoff_low` - Lower band edge normalized to Nyquist
/// * `normal_cutoff_high` - Upper band edge normalized to Nyquist
/// * `order` - Prototype order (the applied filter has twice this order)
pub fn band_pass(
    samples: &[f64],
    normal_cutoff_low: f64,
    normal_cutoff_high: f64,
    order: usize,
) -> Result<Vec<f64>, FilterError> {
    let coeffs = design_bandpass_butter(order, normal_cutoff_low, normal_cutoff_high)?;
    filtfilt(&coeffs, samples)
}
