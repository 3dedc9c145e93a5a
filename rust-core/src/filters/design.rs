//! Butterworth IIR filter design
//!
//! Follows the classical analog-prototype route: place the Butterworth poles,
//! pre-warp the cutoff frequencies, apply the band transform in
//! zero-pole-gain form, then map to the z-plane with the bilinear transform.

use num_complex::Complex64;
use std::f64::consts::PI;

use super::FilterError;

/// Sampling rate assumed by the bilinear transform when cutoffs are given as
/// normalized frequencies (Nyquist = 1)
const DESIGN_FS: f64 = 2.0;

/// Transfer-function coefficients of a designed IIR filter
///
/// `b` is the numerator and `a` the denominator, both in descending powers
/// of z⁻¹, with `a[0] = 1`.
#[derive(Debug, Clone)]
pub struct IirCoefficients {
    /// Numerator coefficients b[n]
    pub b: Vec<f64>,

    /// Denominator coefficients a[n]
    pub a: Vec<f64>,
}

impl IirCoefficients {
    /// Filter order (degree of the denominator)
    pub fn order(&self) -> usize {
        self.a.len().saturating_sub(1)
    }
}

/// Zero-pole-gain form used internally during design
struct Zpk {
    zeros: Vec<Complex64>,
    poles: Vec<Complex64>,
    gain: f64,
}

impl Zpk {
    fn relative_degree(&self) -> usize {
        self.poles.len() - self.zeros.len()
    }
}

/// Design a digital low-pass Butterworth filter
///
/// # Arguments
/// * `order` - Filter order (>= 1)
/// * `normal_cutoff` - Cutoff frequency normalized to Nyquist, in (0, 1)
///
/// # Returns
/// Transfer-function coefficients with `b` and `a` of length `order + 1`
pub fn design_lowpass_butter(
    order: usize,
    normal_cutoff: f64,
) -> Result<IirCoefficients, FilterError> {
    validate_order(order)?;
    validate_cutoff(normal_cutoff)?;

    let warped = prewarp(normal_cutoff);
    let analog = lp2lp(butter_prototype(order), warped);

    Ok(to_coefficients(&bilinear(analog)))
}

/// Design a digital high-pass Butterworth filter
///
/// # Arguments
/// * `order` - Filter order (>= 1)
/// * `normal_cutoff` - Cutoff frequency normalized to Nyquist, in (0, 1)
pub fn design_highpass_butter(
    order: usize,
    normal_cutoff: f64,
) -> Result<IirCoefficients, FilterError> {
    validate_order(order)?;
    validate_cutoff(normal_cutoff)?;

    let warped = prewarp(normal_cutoff);
    let analog = lp2hp(butter_prototype(order), warped);

    Ok(to_coefficients(&bilinear(analog)))
}

/// Design a digital band-pass Butterworth filter
///
/// The band transform doubles the order: the returned coefficients have
/// length `2 * order + 1`.
///
/// # Arguments
/// * `order` - Prototype order (>= 1)
/// * `normal_cutoff_low` - Lower band edge normalized to Nyquist, in (0, 1)
/// * `normal_cutoff_high` - Upper band edge normalized to Nyquist, in (0, 1)
pub fn design_bandpass_butter(
    order: usize,
    normal_cutoff_low: f64,
    normal_cutoff_high: f64,
) -> Result<IirCoefficients, FilterError> {
    validate_order(order)?;
    validate_cutoff(normal_cutoff_low)?;
    validate_cutoff(normal_cutoff_high)?;
    if normal_cutoff_low >= normal_cutoff_high {
        return Err(FilterError::BandEdgesOutOfOrder {
            low: normal_cutoff_low,
            high: normal_cutoff_high,
        });
    }

    let w1 = prewarp(normal_cutoff_low);
    let w2 = prewarp(normal_cutoff_high);
    let bandwidth = w2 - w1;
    let center = (w1 * w2).sqrt();

    let analog = lp2bp(butter_prototype(order), center, bandwidth);

    Ok(to_coefficients(&bilinear(analog)))
}

/// Evaluate the frequency response H(e^jω) at given frequencies
///
/// # Arguments
/// * `coeffs` - Transfer-function coefficients
/// * `frequencies` - Normalized frequencies (units of π rad/sample, 1 = Nyquist)
pub fn frequency_response(coeffs: &IirCoefficients, frequencies: &[f64]) -> Vec<Complex64> {
    frequencies
        .iter()
        .map(|&f| {
            let omega = f * PI;
            evaluate(&coeffs.b, omega) / evaluate(&coeffs.a, omega)
        })
        .collect()
}

fn evaluate(coefficients: &[f64], omega: f64) -> Complex64 {
    coefficients
        .iter()
        .enumerate()
        .map(|(n, &c)| c * Complex64::new(0.0, -(omega * n as f64)).exp())
        .sum()
}

fn validate_order(order: usize) -> Result<(), FilterError> {
    if order == 0 {
        return Err(FilterError::InvalidOrder);
    }
    Ok(())
}

fn validate_cutoff(normal_cutoff: f64) -> Result<(), FilterError> {
    // The comparison also rejects NaN
    if !(normal_cutoff > 0.0 && normal_cutoff < 1.0) {
        return Err(FilterError::CutoffOutOfRange(normal_cutoff));
    }
    Ok(())
}

/// Analog Butterworth prototype: unit-circle poles in the left half plane,
/// no zeros, unit gain
fn butter_prototype(order: usize) -> Zpk {
    let n = order as f64;
    let poles = (0..order)
        .map(|i| {
            // Pole angles step through -N+1, -N+3, ..., N-1
            let m = (2 * i + 1) as f64 - n;
            -Complex64::new(0.0, PI * m / (2.0 * n)).exp()
        })
        .collect();

    Zpk {
        zeros: Vec::new(),
        poles,
        gain: 1.0,
    }
}

/// Map a normalized digital cutoff to the analog frequency the bilinear
/// transform will warp back onto it
fn prewarp(normal_cutoff: f64) -> f64 {
    2.0 * DESIGN_FS * (PI * normal_cutoff / DESIGN_FS).tan()
}

/// Shift a lowpass prototype to cutoff `wo`
fn lp2lp(proto: Zpk, wo: f64) -> Zpk {
    let degree = proto.relative_degree();

    Zpk {
        zeros: proto.zeros.iter().map(|&z| z * wo).collect(),
        poles: proto.poles.iter().map(|&p| p * wo).collect(),
        gain: proto.gain * wo.powi(degree as i32),
    }
}

/// Transform a lowpass prototype to a highpass filter with cutoff `wo`
fn lp2hp(proto: Zpk, wo: f64) -> Zpk {
    let degree = proto.relative_degree();

    let mut zeros: Vec<Complex64> = proto.zeros.iter().map(|&z| wo / z).collect();
    let poles: Vec<Complex64> = proto.poles.iter().map(|&p| wo / p).collect();

    // Degree-matching zeros at the origin
    zeros.extend(std::iter::repeat(Complex64::new(0.0, 0.0)).take(degree));

    let num: Complex64 = proto.zeros.iter().map(|&z| -z).product();
    let den: Complex64 = proto.poles.iter().map(|&p| -p).product();

    Zpk {
        zeros,
        poles,
        gain: proto.gain * (num / den).re,
    }
}

/// Transform a lowpass prototype to a bandpass filter centered on `wo` with
/// bandwidth `bw` (doubles the order)
fn lp2bp(proto: Zpk, wo: f64, bw: f64) -> Zpk {
    let degree = proto.relative_degree();
    let scale = bw / 2.0;
    let wo2 = Complex64::new(wo * wo, 0.0);

    let mut zeros = Vec::with_capacity(2 * proto.zeros.len() + degree);
    let mut poles = Vec::with_capacity(2 * proto.poles.len());

    for &z in &proto.zeros {
        let shifted = z * scale;
        let disc = (shifted * shifted - wo2).sqrt();
        zeros.push(shifted + disc);
        zeros.push(shifted - disc);
    }
    for &p in &proto.poles {
        let shifted = p * scale;
        let disc = (shifted * shifted - wo2).sqrt();
        poles.push(shifted + disc);
        poles.push(shifted - disc);
    }

    zeros.extend(std::iter::repeat(Complex64::new(0.0, 0.0)).take(degree));

    Zpk {
        zeros,
        poles,
        gain: proto.gain * bw.powi(degree as i32),
    }
}

/// Bilinear transform from the s-plane to the z-plane at the design rate
fn bilinear(analog: Zpk) -> Zpk {
    let fs2 = Complex64::new(2.0 * DESIGN_FS, 0.0);
    let degree = analog.relative_degree();

    let mut zeros: Vec<Complex64> = analog.zeros.iter().map(|&z| (fs2 + z) / (fs2 - z)).collect();
    let poles: Vec<Complex64> = analog.poles.iter().map(|&p| (fs2 + p) / (fs2 - p)).collect();

    // s = infinity maps to z = -1
    zeros.extend(std::iter::repeat(Complex64::new(-1.0, 0.0)).take(degree));

    let num: Complex64 = analog.zeros.iter().map(|&z| fs2 - z).product();
    let den: Complex64 = analog.poles.iter().map(|&p| fs2 - p).product();

    Zpk {
        zeros,
        poles,
        gain: analog.gain * (num / den).re,
    }
}

/// Expand roots into polynomial coefficients (leading coefficient 1)
fn polynomial(roots: &[Complex64]) -> Vec<Complex64> {
    let mut coefficients = vec![Complex64::new(1.0, 0.0)];

    for root in roots {
        let mut next = vec![Complex64::new(0.0, 0.0); coefficients.len() + 1];
        for (i, &c) in coefficients.iter().enumerate() {
            next[i] += c;
            next[i + 1] -= c * *root;
        }
        coefficients = next;
    }

    coefficients
}

/// Convert zero-pole-gain form to transfer-function coefficients
///
/// Zeros and poles come in conjugate pairs, so the imaginary parts of the
/// expanded polynomials vanish up to rounding.
fn to_coefficients(zpk: &Zpk) -> IirCoefficients {
    let b = polynomial(&zpk.zeros)
        .iter()
        .map(|&c| (c * zpk.gain).re)
        .collect();
    let a = polynomial(&zpk.poles).iter().map(|c| c.re).collect();

    IirCoefficients { b, a }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_order_half_band_lowpass() {
        // Closed form: b = [0.5, 0.5], a = [1, 0]
        let coeffs = design_lowpass_butter(1, 0.5).unwrap();

        assert_eq!(coeffs.b.len(), 2);
        assert_eq!(coeffs.a.len(), 2);
        assert!((coeffs.b[0] - 0.5).abs() < 1e-12);
        assert!((coeffs.b[1] - 0.5).abs() < 1e-12);
        assert!((coeffs.a[0] - 1.0).abs() < 1e-12);
        assert!(coeffs.a[1].abs() < 1e-12);
    }

    #[test]
    fn test_second_order_half_band_lowpass() {
        // Classic half-band design: b0 = b2 = 1 - sqrt(2)/2, a2 = 3 - 2*sqrt(2)
        let coeffs = design_lowpass_butter(2, 0.5).unwrap();

        let b0 = 1.0 - 2.0_f64.sqrt() / 2.0;
        let a2 = 3.0 - 2.0 * 2.0_f64.sqrt();

        assert!((coeffs.b[0] - b0).abs() < 1e-9);
        assert!((coeffs.b[1] - 2.0 * b0).abs() < 1e-9);
        assert!((coeffs.b[2] - b0).abs() < 1e-9);
        assert!((coeffs.a[0] - 1.0).abs() < 1e-12);
        assert!(coeffs.a[1].abs() < 1e-9);
        assert!((coeffs.a[2] - a2).abs() < 1e-9);
    }

    #[test]
    fn test_lowpass_response_landmarks() {
        let coeffs = design_lowpass_butter(4, 0.25).unwrap();
        let response = frequency_response(&coeffs, &[0.0, 0.25, 0.9, 1.0]);

        // Unity at DC, -3 dB at the cutoff, essentially zero at Nyquist
        assert!((response[0].norm() - 1.0).abs() < 1e-9);
        assert!((response[1].norm() - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
        assert!(response[2].norm() < 0.01);
        assert!(response[3].norm() < 1e-9);
    }

    #[test]
    fn test_highpass_response_landmarks() {
        let coeffs = design_highpass_butter(4, 0.3).unwrap();
        let response = frequency_response(&coeffs, &[0.0, 0.3, 1.0]);

        assert!(response[0].norm() < 1e-9);
        assert!((response[1].norm() - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
        assert!((response[2].norm() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_bandpass_response_landmarks() {
        let coeffs = design_bandpass_butter(2, 0.2, 0.4).unwrap();

        // Band transform doubles the order
        assert_eq!(coeffs.b.len(), 5);
        assert_eq!(coeffs.a.len(), 5);

        let response = frequency_response(&coeffs, &[0.02, 0.2, 0.4, 0.95]);
        assert!(response[0].norm() < 0.05);
        assert!((response[1].norm() - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
        assert!((response[2].norm() - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
        assert!(response[3].norm() < 0.05);

        // Unity gain at the warped band center
        let w1 = prewarp(0.2);
        let w2 = prewarp(0.4);
        let center_digital = 2.0 * ((w1 * w2).sqrt() / (2.0 * DESIGN_FS)).atan() / PI;
        let peak = frequency_response(&coeffs, &[center_digital]);
        assert!((peak[0].norm() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_denominator_is_monic() {
        for order in 1..=8 {
            let coeffs = design_lowpass_butter(order, 0.17).unwrap();
            assert!((coeffs.a[0] - 1.0).abs() < 1e-9, "order {}", order);
            assert_eq!(coeffs.order(), order);
        }
    }

    #[test]
    fn test_parameter_validation() {
        assert!(matches!(
            design_lowpass_butter(0, 0.5),
            Err(FilterError::InvalidOrder)
        ));
        assert!(matches!(
            design_lowpass_butter(2, 0.0),
            Err(FilterError::CutoffOutOfRange(_))
        ));
        assert!(matches!(
            design_highpass_butter(2, 1.0),
            Err(FilterError::CutoffOutOfRange(_))
        ));
        assert!(matches!(
            design_bandpass_butter(2, 0.4, 0.2),
            Err(FilterError::BandEdgesOutOfOrder { .. })
        ));
        assert!(matches!(
            design_bandpass_butter(2, 0.3, 0.3),
            Err(FilterError::BandEdgesOutOfOrder { .. })
        ));
    }
}
