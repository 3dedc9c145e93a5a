//! Spectral analysis with a full-length FFT

pub mod fft;

pub use fft::{fftfreq, fourier_transform, FourierAnalyzer, Spectrum};
