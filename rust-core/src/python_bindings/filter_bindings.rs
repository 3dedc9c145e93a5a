//! Python bindings for filter selection

use pyo3::prelude::*;

use crate::filters::FilterKind;

/// Filter kind enum exposed to Python
#[pyclass(name = "FilterKind")]
#[derive(Clone)]
pub enum PyFilterKind {
    Lowpass,
    Highpass,
    Bandpass,
}

impl From<PyFilterKind> for FilterKind {
    fn from(py_kind: PyFilterKind) -> Self {
        match py_kind {
            PyFilterKind::Lowpass => FilterKind::Lowpass,
            PyFilterKind::Highpass => FilterKind::Highpass,
            PyFilterKind::Bandpass => FilterKind::Bandpass,
        }
    }
}
