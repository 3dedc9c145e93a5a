//! Discrete Fourier transform of whole signals
//!
//! One full-length transform per call: no windowing, no zero padding, no
//! overlap. Bin frequencies follow the standard FFT layout with the negative
//! frequencies in the upper half.

use num_complex::Complex64;
use rustfft::FftPlanner;

/// Complex spectrum of a signal with its bin frequencies
#[derive(Debug, Clone)]
pub struct Spectrum {
    /// Bin frequencies in Hz: 0, positive bins, then negative bins
    pub frequencies: Vec<f64>,

    /// Complex transform values, parallel to `frequencies`
    pub values: Vec<Complex64>,
}

impl Spectrum {
    /// Number of bins
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the spectrum holds no bins
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Magnitude of every bin
    pub fn magnitudes(&self) -> Vec<f64> {
        self.values.iter().map(|v| v.norm()).collect()
    }

    /// Display view: strictly positive frequencies and their magnitudes
    ///
    /// Mirrors plotting with a `frequency > 0` mask; DC and the negative
    /// half are dropped.
    pub fn positive(&self) -> (Vec<f64>, Vec<f64>) {
        let mut frequencies = Vec::with_capacity(self.len() / 2);
        let mut magnitudes = Vec::with_capacity(self.len() / 2);

        for (&f, v) in self.frequencies.iter().zip(self.values.iter()) {
            if f > 0.0 {
                frequencies.push(f);
                magnitudes.push(v.norm());
            }
        }

        (frequencies, magnitudes)
    }
}

/// FFT engine with a reusable planner
///
/// The planner caches plans, so transforming several signals of the same
/// length amortizes the setup cost.
pub struct FourierAnalyzer {
    planner: FftPlanner<f64>,
}

impl FourierAnalyzer {
    /// Create a new analyzer
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
        }
    }

    /// Compute the full-length transform of a signal
    ///
    /// # Arguments
    /// * `samples` - Input signal
    /// * `sample_rate` - Sample rate in Hz, used for the bin frequencies
    ///
    /// # Returns
    /// Complex spectrum with one bin per input sample
    pub fn transform(&mut self, samples: &[f64], sample_rate: u32) -> Spectrum {
        let n = samples.len();
        if n == 0 {
            return Spectrum {
                frequencies: Vec::new(),
                values: Vec::new(),
            };
        }

        let fft = self.planner.plan_fft_forward(n);

        let mut values: Vec<Complex64> =
            samples.iter().map(|&s| Complex64::new(s, 0.0)).collect();
        fft.process(&mut values);

        Spectrum {
            frequencies: fftfreq(n, 1.0 / sample_rate as f64),
            values,
        }
    }
}

impl Default for FourierAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute the transform of a signal with a one-off analyzer
pub fn fourier_transform(samples: &[f64], sample_rate: u32) -> Spectrum {
    FourierAnalyzer::new().transform(samples, sample_rate)
}

/// Bin frequencies for an n-point transform with sample spacing `d` seconds
///
/// Layout: `[0, 1, ..., ⌈n/2⌉-1, -⌊n/2⌋, ..., -1] / (n * d)`
pub fn fftfreq(n: usize, d: f64) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }

    let step = 1.0 / (n as f64 * d);
    let positive = (n - 1) / 2 + 1;
    let negative = n / 2;

    let mut frequencies = Vec::with_capacity(n);
    for i in 0..positive {
        frequencies.push(i as f64 * step);
    }
    for i in 0..negative {
        frequencies.push(-((negative - i) as f64) * step);
    }

    frequencies
}
