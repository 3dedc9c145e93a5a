//! Butterworth IIR filter design and zero-phase filtering

use thiserror::Error;

pub mod design;
pub mod iir;
pub mod zero_phase;

pub use design::{
    design_bandpass_butter, design_highpass_butter, design_lowpass_butter, frequency_response,
    IirCoefficients,
};
pub use iir::IirFilter;
pub use zero_phase::{band_pass, filtfilt, high_pass, low_pass};

/// Band type of a designed filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Lowpass,
    Highpass,
    Bandpass,
}

/// Errors raised by filter design and application
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Filter order must be at least 1")]
    InvalidOrder,

    #[error("Normalized cutoff {0} is outside the open interval (0, 1)")]
    CutoffOutOfRange(f64),

    #[error("Band-pass cutoffs must satisfy low < high (got {low} and {high})")]
    BandEdgesOutOfOrder { low: f64, high: f64 },

    #[error("Signal of {len} samples is too short for zero-phase filtering (needs more than {padlen})")]
    SignalTooShort { len: usize, padlen: usize },
}
