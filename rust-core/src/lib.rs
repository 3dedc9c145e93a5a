//! Filter Workbench - Offline Audio Filtering and Spectrum Core
//!
//! Loads an audio file, applies a zero-phase Butterworth filter (low-pass,
//! high-pass, or band-pass), computes the spectra a plotting front end draws,
//! and exports the result as a PCM WAV file. Ships optional Python bindings
//! for the GUI shell.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod audio;
pub mod filters;
#[cfg(feature = "python")]
pub mod python_bindings;
pub mod spectrum;
pub mod workbench;

pub use audio::{AudioError, Signal};
pub use filters::{FilterError, FilterKind, IirCoefficients};
pub use spectrum::{FourierAnalyzer, Spectrum};
pub use workbench::{FilterReport, FilterRequest, Workbench, WorkbenchError};
