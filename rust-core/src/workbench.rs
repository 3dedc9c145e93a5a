//! Filtering session orchestration
//!
//! Owns the currently loaded signal and the most recent filtered result —
//! the explicit replacement for the original tool's process-wide globals.
//! The GUI event handlers map one-to-one onto [`Workbench::load_file`],
//! [`Workbench::apply`], and [`Workbench::save`].

use std::path::Path;

use thiserror::Error;

use crate::audio::{self, AudioError, Signal};
use crate::filters::{self, FilterError, FilterKind};
use crate::spectrum::FourierAnalyzer;

/// Errors surfaced to the user interface, one per failed action
#[derive(Error, Debug)]
pub enum WorkbenchError {
    #[error("No audio file loaded")]
    NoFileLoaded,

    #[error("No filtered audio to save")]
    NoFilteredAudio,

    #[error("Cutoff {cutoff_hz} Hz must lie strictly between 0 and the Nyquist frequency ({nyquist} Hz)")]
    CutoffOutOfRange { cutoff_hz: f64, nyquist: f64 },

    #[error(transparent)]
    Audio(#[from] AudioError),

    #[error(transparent)]
    Filter(#[from] FilterError),
}

/// Parameters of one filter application, as read from the GUI controls
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterRequest {
    Lowpass { cutoff_hz: f64, order: usize },
    Highpass { cutoff_hz: f64, order: usize },
    Bandpass { low_hz: f64, high_hz: f64, order: usize },
}

impl FilterRequest {
    /// Band type of the requested filter
    pub fn kind(&self) -> FilterKind {
        match self {
            FilterRequest::Lowpass { .. } => FilterKind::Lowpass,
            FilterRequest::Highpass { .. } => FilterKind::Highpass,
            FilterRequest::Bandpass { .. } => FilterKind::Bandpass,
        }
    }

    /// Requested filter order
    pub fn order(&self) -> usize {
        match *self {
            FilterRequest::Lowpass { order, .. }
            | FilterRequest::Highpass { order, .. }
            | FilterRequest::Bandpass { order, .. } => order,
        }
    }
}

/// Plot-ready outcome of a filter application
///
/// Carries the four views the interface draws: both waveforms over a shared
/// time axis, and the positive-frequency magnitude spectra of both signals.
#[derive(Debug, Clone)]
pub struct FilterReport {
    /// Time axis in seconds, one instant per sample
    pub time_axis: Vec<f64>,

    /// Samples of the signal before filtering
    pub original_waveform: Vec<f64>,

    /// Samples of the signal after filtering
    pub filtered_waveform: Vec<f64>,

    /// Positive bin frequencies (Hz) of the original signal's spectrum
    pub original_spectrum_frequencies: Vec<f64>,

    /// Magnitudes matching `original_spectrum_frequencies`
    pub original_spectrum_magnitude: Vec<f64>,

    /// Positive bin frequencies (Hz) of the filtered signal's spectrum
    pub filtered_spectrum_frequencies: Vec<f64>,

    /// Magnitudes matching `filtered_spectrum_frequencies`
    pub filtered_spectrum_magnitude: Vec<f64>,

    /// Sample rate shared by both signals
    pub sample_rate: u32,
}

/// Filtering session state
pub struct Workbench {
    analyzer: FourierAnalyzer,
    current: Option<Signal>,
    filtered: Option<Signal>,
}

impl Workbench {
    /// Create an empty session
    pub fn new() -> Self {
        Self {
            analyzer: FourierAnalyzer::new(),
            current: None,
            filtered: None,
        }
    }

    /// Load an audio file and make it the current signal
    pub fn load_file(&mut self, path: &Path) -> Result<&Signal, WorkbenchError> {
        let signal = audio::load(path)?;
        Ok(self.current.insert(signal))
    }

    /// Make an already decoded signal the current signal
    pub fn set_signal(&mut self, signal: Signal) {
        self.current = Some(signal);
    }

    /// Currently loaded signal, if any
    pub fn current(&self) -> Option<&Signal> {
        self.current.as_ref()
    }

    /// Most recent filtered signal, if any
    pub fn filtered(&self) -> Option<&Signal> {
        self.filtered.as_ref()
    }

    /// Apply the requested filter to the current signal
    ///
    /// Designs the Butterworth filter from the request, applies it with zero
    /// phase, computes the spectra of the original and filtered signal, and
    /// stores the filtered signal for export. A second application replaces
    /// the previous result.
    pub fn apply(&mut self, request: &FilterRequest) -> Result<FilterReport, WorkbenchError> {
        let signal = self.current.as_ref().ok_or(WorkbenchError::NoFileLoaded)?;
        let nyquist = signal.nyquist();

        let filtered_samples = match *request {
            FilterRequest::Lowpass { cutoff_hz, order } => {
                let cutoff = normalized_cutoff(cutoff_hz, nyquist)?;
                filters::low_pass(&signal.samples, cutoff, order)?
            }
            FilterRequest::Highpass { cutoff_hz, order } => {
                let cutoff = normalized_cutoff(cutoff_hz, nyquist)?;
                filters::high_pass(&signal.samples, cutoff, order)?
            }
            FilterRequest::Bandpass {
                low_hz,
                high_hz,
                order,
            } => {
                let low = normalized_cutoff(low_hz, nyquist)?;
                let high = normalized_cutoff(high_hz, nyquist)?;
                filters::band_pass(&signal.samples, low, high, order)?
            }
        };

        log::debug!(
            "applied {:?} filter of order {} to {} samples",
            request.kind(),
            request.order(),
            filtered_samples.len()
        );

        let filtered = Signal::new(filtered_samples, signal.sample_rate);

        let (original_freqs, original_mags) = self
            .analyzer
            .transform(&signal.samples, signal.sample_rate)
            .positive();
        let (filtered_freqs, filtered_mags) = self
            .analyzer
            .transform(&filtered.samples, filtered.sample_rate)
            .positive();

        let report = FilterReport {
            time_axis: signal.time_axis(),
            original_waveform: signal.samples.clone(),
            filtered_waveform: filtered.samples.clone(),
            original_spectrum_frequencies: original_freqs,
            original_spectrum_magnitude: original_mags,
            filtered_spectrum_frequencies: filtered_freqs,
            filtered_spectrum_magnitude: filtered_mags,
            sample_rate: signal.sample_rate,
        };

        self.filtered = Some(filtered);

        Ok(report)
    }

    /// Export the filtered signal as a PCM WAV file at the source rate
    pub fn save(&self, path: &Path) -> Result<(), WorkbenchError> {
        let filtered = self
            .filtered
            .as_ref()
            .ok_or(WorkbenchError::NoFilteredAudio)?;

        audio::save_wav(filtered, path)?;
        Ok(())
    }
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new()
    }
}

fn normalized_cutoff(cutoff_hz: f64, nyquist: f64) -> Result<f64, WorkbenchError> {
    // The comparison also rejects NaN
    if !(cutoff_hz > 0.0 && cutoff_hz < nyquist) {
        return Err(WorkbenchError::CutoffOutOfRange { cutoff_hz, nyquist });
    }
    Ok(cutoff_hz / nyquist)
}
