//! Audio file loading via symphonia
//!
//! Decodes common containers (wav/mp3/aac/flac/ogg) into a mono signal at the
//! file's native sample rate. Multi-channel input is averaged down to mono.

use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::probe::Hint;
use symphonia::default::{get_codecs, get_probe};

use super::resample::resample;
use super::signal::Signal;
use super::AudioError;

/// Load an audio file as a mono signal at its native sample rate
///
/// # Arguments
/// * `path` - Audio file in any supported container (wav, mp3, aac, flac, ogg)
///
/// # Returns
/// Decoded mono signal; channels are averaged when the file has more than one
pub fn load(path: &Path) -> Result<Signal, AudioError> {
    let file = File::open(path).map_err(|e| AudioError::Open(e.to_string()))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|ext| ext.to_str()) {
        hint.with_extension(ext);
    }

    let probed = get_probe()
        .format(&hint, mss, &FormatOptions::default(), &Default::default())
        .map_err(|e| AudioError::Probe(e.to_string()))?;
    let mut format = probed.format;

    let track = format.default_track().ok_or(AudioError::NoTrack)?;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or(AudioError::MissingSampleRate)?;

    let mut decoder = get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| AudioError::Decode(e.to_string()))?;

    let mut samples = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(err))
                if err.kind() == ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(err) => return Err(AudioError::Decode(err.to_string())),
        };

        let audio_buffer = decoder
            .decode(&packet)
            .map_err(|e| AudioError::Decode(e.to_string()))?;

        let spec = *audio_buffer.spec();
        let mut sample_buffer = SampleBuffer::<f32>::new(audio_buffer.capacity() as u64, spec);
        sample_buffer.copy_interleaved_ref(audio_buffer);

        let channels = spec.channels.count();
        if channels == 0 {
            continue;
        }

        // Average every frame down to mono
        for frame in sample_buffer.samples().chunks_exact(channels) {
            let sum: f32 = frame.iter().sum();
            samples.push((sum / channels as f32) as f64);
        }
    }

    if samples.is_empty() {
        return Err(AudioError::Empty);
    }

    log::info!(
        "loaded {} samples at {} Hz from {}",
        samples.len(),
        sample_rate,
        path.display()
    );

    Ok(Signal::new(samples, sample_rate))
}

/// Load an audio file and resample it to a target rate
///
/// Mirrors loading with an explicit sample rate: the file is decoded at its
/// native rate, then sinc-resampled when the rates differ.
pub fn load_resampled(path: &Path, target_rate: u32) -> Result<Signal, AudioError> {
    let native = load(path)?;

    if native.sample_rate == target_rate {
        return Ok(native);
    }

    let resampled = resample(&native.samples, native.sample_rate, target_rate)?;
    Ok(Signal::new(resampled, target_rate))
}
