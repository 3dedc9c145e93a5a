//! Python bindings for the filtering workbench

use std::path::PathBuf;

use numpy::PyArray1;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::filter_bindings::PyFilterKind;
use crate::filters::FilterKind;
use crate::workbench::{FilterRequest, Workbench};

/// Filtering session exposed to Python
#[pyclass(name = "Workbench", unsendable)]
pub struct PyWorkbench {
    workbench: Workbench,
}

#[pymethods]
impl PyWorkbench {
    /// Create an empty session
    #[new]
    fn new() -> Self {
        Self {
            workbench: Workbench::new(),
        }
    }

    /// Load an audio file as the current signal
    ///
    /// Args:
    ///     path: Audio file path (wav, mp3, aac, flac, ogg)
    ///
    /// Returns:
    ///     Tuple of (sample_count, sample_rate)
    fn load(&mut self, path: PathBuf) -> PyResult<(usize, u32)> {
        let signal = self
            .workbench
            .load_file(&path)
            .map_err(|e| PyErr::new::<PyRuntimeError, _>(e.to_string()))?;

        Ok((signal.len(), signal.sample_rate))
    }

    /// Apply a Butterworth filter to the loaded signal
    ///
    /// Args:
    ///     kind: Filter kind
    ///     cutoff_hz: Cutoff frequency in Hz (lower edge for band-pass)
    ///     order: Filter order
    ///     upper_cutoff_hz: Upper band edge in Hz (band-pass only)
    ///
    /// Returns:
    ///     Dictionary with keys 'time_axis', 'original_waveform',
    ///     'filtered_waveform', 'original_spectrum_frequencies',
    ///     'original_spectrum_magnitude', 'filtered_spectrum_frequencies',
    ///     'filtered_spectrum_magnitude', 'sample_rate'
    #[pyo3(signature = (kind, cutoff_hz, order, upper_cutoff_hz = None))]
    fn apply_filter(
        &mut self,
        py: Python<'_>,
        kind: PyFilterKind,
        cutoff_hz: f64,
        order: usize,
        upper_cutoff_hz: Option<f64>,
    ) -> PyResult<PyObject> {
        let request = match kind.into() {
            FilterKind::Lowpass => FilterRequest::Lowpass { cutoff_hz, order },
            FilterKind::Highpass => FilterRequest::Highpass { cutoff_hz, order },
            FilterKind::Bandpass => {
                let high_hz = upper_cutoff_hz.ok_or_else(|| {
                    PyErr::new::<PyValueError, _>(
                        "band-pass filtering needs an upper cutoff frequency",
                    )
                })?;
                FilterRequest::Bandpass {
                    low_hz: cutoff_hz,
                    high_hz,
                    order,
                }
            }
        };

        let report = self
            .workbench
            .apply(&request)
            .map_err(|e| PyErr::new::<PyRuntimeError, _>(e.to_string()))?;

        let dict = PyDict::new(py);
        dict.set_item("time_axis", PyArray1::from_vec(py, report.time_axis))?;
        dict.set_item(
            "original_waveform",
            PyArray1::from_vec(py, report.original_waveform),
        )?;
        dict.set_item(
            "filtered_waveform",
            PyArray1::from_vec(py, report.filtered_waveform),
        )?;
        dict.set_item(
            "original_spectrum_frequencies",
            PyArray1::from_vec(py, report.original_spectrum_frequencies),
        )?;
        dict.set_item(
            "original_spectrum_magnitude",
            PyArray1::from_vec(py, report.original_spectrum_magnitude),
        )?;
        dict.set_item(
            "filtered_spectrum_frequencies",
            PyArray1::from_vec(py, report.filtered_spectrum_frequencies),
        )?;
        dict.set_item(
            "filtered_spectrum_magnitude",
            PyArray1::from_vec(py, report.filtered_spectrum_magnitude),
        )?;
        dict.set_item("sample_rate", report.sample_rate)?;

        Ok(dict.into())
    }

    /// Export the filtered signal as a PCM WAV file
    ///
    /// Args:
    ///     path: Destination path
    fn save(&self, path: PathBuf) -> PyResult<()> {
        self.workbench
            .save(&path)
            .map_err(|e| PyErr::new::<PyRuntimeError, _>(e.to_string()))
    }

    /// Sample rate of the loaded signal, or None
    fn sample_rate(&self) -> Option<u32> {
        self.workbench.current().map(|s| s.sample_rate)
    }

    /// Duration of the loaded signal in seconds, or None
    fn duration_secs(&self) -> Option<f64> {
        self.workbench.current().map(|s| s.duration_secs())
    }
}
