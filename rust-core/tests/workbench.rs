//! End-to-end session flow: write a WAV, load it, filter it, export it

use std::f64::consts::PI;
use std::path::Path;

use filter_workbench::{audio, FilterRequest, Workbench};

/// Write a mono 16-bit PCM WAV with the given samples
fn write_wav(path: &Path, samples: &[f64], sample_rate: u32) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for &s in samples {
        writer
            .write_sample((s.clamp(-1.0, 1.0) * i16::MAX as f64) as i16)
            .unwrap();
    }
    writer.finalize().unwrap();
}

/// Dominant positive frequency of a spectrum view
fn peak_frequency(freqs: &[f64], mags: &[f64]) -> f64 {
    let (idx, _) = mags
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
        .unwrap();
    freqs[idx]
}

#[test]
fn test_load_filter_and_export_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("mix.wav");
    let output_path = dir.path().join("filtered.wav");

    // One second of 200 Hz + 2.5 kHz at 8 kHz
    let sample_rate = 8000;
    let samples: Vec<f64> = (0..8000)
        .map(|n| {
            let t = n as f64 / sample_rate as f64;
            0.4 * (2.0 * PI * 200.0 * t).sin() + 0.4 * (2.0 * PI * 2500.0 * t).sin()
        })
        .collect();
    write_wav(&input_path, &samples, sample_rate);

    let mut workbench = Workbench::new();

    let loaded = workbench.load_file(&input_path).unwrap();
    assert_eq!(loaded.sample_rate, sample_rate);
    assert_eq!(loaded.len(), 8000);

    let report = workbench
        .apply(&FilterRequest::Lowpass {
            cutoff_hz: 1000.0,
            order: 4,
        })
        .unwrap();

    // The 2.5 kHz component dominates neither spectrum view after filtering
    let original_peak = peak_frequency(
        &report.original_spectrum_frequencies,
        &report.original_spectrum_magnitude,
    );
    let filtered_peak = peak_frequency(
        &report.filtered_spectrum_frequencies,
        &report.filtered_spectrum_magnitude,
    );
    assert!(original_peak > 0.0);
    assert!((filtered_peak - 200.0).abs() < 5.0);

    workbench.save(&output_path).unwrap();

    // The exported file decodes back to a signal of the same shape
    let exported = audio::load(&output_path).unwrap();
    assert_eq!(exported.sample_rate, sample_rate);
    assert_eq!(exported.len(), 8000);

    // And its spectrum still peaks at the passband tone
    let spectrum = filter_workbench::spectrum::fourier_transform(&exported.samples, sample_rate);
    let (freqs, mags) = spectrum.positive();
    assert!((peak_frequency(&freqs, &mags) - 200.0).abs() < 5.0);
}

#[test]
fn test_loader_downmixes_stereo_to_mono() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stereo.wav");

    // Left and right channels cancel exactly
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: 44100,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    for _ in 0..4410 {
        writer.write_sample(12000_i16).unwrap();
        writer.write_sample(-12000_i16).unwrap();
    }
    writer.finalize().unwrap();

    let signal = audio::load(&path).unwrap();

    assert_eq!(signal.sample_rate, 44100);
    assert_eq!(signal.len(), 4410);
    for &s in &signal.samples {
        assert!(s.abs() < 1e-3, "downmix left residue {}", s);
    }
}

#[test]
fn test_missing_file_is_an_open_error() {
    let mut workbench = Workbench::new();
    let result = workbench.load_file(Path::new("/nonexistent/audio.wav"));

    assert!(matches!(
        result,
        Err(filter_workbench::WorkbenchError::Audio(
            filter_workbench::AudioError::Open(_)
        ))
    ));
}
