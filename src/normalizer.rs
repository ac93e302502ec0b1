//! Audio normalization for fishscan.
//!
//! Responsibilities:
//! - Extract the audio track from a downloaded media file
//! - Convert Symphonia-decoded PCM into interleaved `f32`
//! - Downmix to mono, preserving the source sample rate
//! - Convert to 16-bit PCM (the recognition wire encoding)
//! - Write the mono waveform as a scratch WAV artifact
//!
//! The artifact is an observable side effect of this stage: it lives in the
//! run's scratch directory while the video is in flight and the orchestrator
//! removes it once the video reaches `Reported` or `Failed`.

use std::path::Path;

use anyhow::{Result, anyhow, bail};
use hound::{SampleFormat, WavSpec, WavWriter};
use symphonia::core::audio::{AudioBufferRef, SampleBuffer};
use tracing::debug;

use crate::error::Error;
use crate::extract::AudioTrackReader;
use crate::waveform::Waveform;

/// Extract the audio track of `media_path` as a mono waveform.
///
/// Output guarantees:
/// - channel count is 1 (downmixed when the source has more)
/// - sample rate is preserved from the source
///
/// A missing or undecodable audio track is [`Error::Extraction`], fatal for
/// this video only.
pub fn extract_audio(media_path: &Path) -> crate::Result<Waveform> {
    let waveform =
        extract_mono_waveform(media_path).map_err(|e| Error::Extraction(format!("{e:#}")))?;

    debug!(
        media = %media_path.display(),
        sample_rate = waveform.sample_rate(),
        samples = waveform.samples().len(),
        "extracted mono audio track"
    );

    Ok(waveform)
}

/// Write the normalized waveform to `artifact_path` as a 16-bit mono WAV.
///
/// This is the stage's observable side effect: the artifact lives in the
/// scratch directory until the orchestrator removes it. Failures are
/// [`Error::Normalization`], fatal for this video only.
pub fn write_artifact(waveform: &Waveform, artifact_path: &Path) -> crate::Result<()> {
    write_wav_artifact(waveform, artifact_path)
        .map_err(|e| Error::Normalization(format!("{e:#}")))?;

    debug!(artifact = %artifact_path.display(), "wrote scratch audio artifact");
    Ok(())
}

/// Decode the whole audio track into a mono i16 waveform.
fn extract_mono_waveform(media_path: &Path) -> Result<Waveform> {
    let mut reader = AudioTrackReader::open(media_path)?;
    let mut pipeline = MonoPipeline::new();

    while reader.decode_next(|decoded| pipeline.push_decoded(decoded))? {}

    pipeline.finish()
}

/// A small stateful pipeline that converts decoded buffers into mono i16.
struct MonoPipeline {
    // Scratch buffer used to copy decoded PCM into an interleaved `Vec<f32>`.
    sample_buf_f32: Option<SampleBuffer<f32>>,
    mono: Vec<i16>,
    sample_rate: Option<u32>,
}

impl MonoPipeline {
    fn new() -> Self {
        Self {
            sample_buf_f32: None,
            mono: Vec::new(),
            sample_rate: None,
        }
    }

    fn push_decoded(&mut self, decoded: &AudioBufferRef<'_>) -> Result<()> {
        let (interleaved, src_rate, channels) =
            decoded_to_interleaved_f32(decoded, &mut self.sample_buf_f32)?;

        // The sample rate must stay constant across the whole track.
        match self.sample_rate {
            None => self.sample_rate = Some(src_rate),
            Some(rate) if rate != src_rate => {
                bail!("sample rate changed mid-track ({rate} Hz -> {src_rate} Hz)")
            }
            Some(_) => {}
        }

        let mono = downmix_to_mono(&interleaved, channels);
        self.mono.extend(mono.iter().map(|&s| f32_to_i16(s)));
        Ok(())
    }

    fn finish(self) -> Result<Waveform> {
        let Some(sample_rate) = self.sample_rate else {
            bail!("audio track produced no decodable samples");
        };
        if self.mono.is_empty() {
            bail!("audio track produced no decodable samples");
        }

        Ok(Waveform::new(self.mono, sample_rate))
    }
}

fn decoded_to_interleaved_f32(
    decoded: &AudioBufferRef<'_>,
    sample_buf_f32: &mut Option<SampleBuffer<f32>>,
) -> Result<(Vec<f32>, u32, usize)> {
    ensure_sample_buffer(decoded, sample_buf_f32);

    let buf = sample_buf_f32
        .as_mut()
        .ok_or_else(|| anyhow!("sample buffer not initialized"))?;

    // Copy decoded PCM into our interleaved scratch buffer.
    buf.copy_interleaved_ref(decoded.clone());

    let src_rate = decoded.spec().rate;
    let channels = decoded.spec().channels.count();
    if channels == 0 {
        bail!("decoded audio had zero channels");
    }

    Ok((buf.samples().to_vec(), src_rate, channels))
}

fn ensure_sample_buffer(
    decoded: &AudioBufferRef<'_>,
    sample_buf_f32: &mut Option<SampleBuffer<f32>>,
) {
    if sample_buf_f32.is_some() {
        return;
    }

    let spec = *decoded.spec();
    let duration = decoded.capacity() as u64;
    *sample_buf_f32 = Some(SampleBuffer::<f32>::new(duration, spec));
}

/// Downmix interleaved samples into mono by averaging channels.
///
/// Policy: equal-weight average across channels (simple, predictable).
fn downmix_to_mono(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels == 1 {
        return interleaved.to_vec();
    }

    let frames = interleaved.len() / channels;
    let mut mono = Vec::with_capacity(frames);

    for f in 0..frames {
        let base = f * channels;
        let mut acc = 0.0;
        for c in 0..channels {
            acc += interleaved[base + c];
        }
        mono.push(acc / channels as f32);
    }

    mono
}

/// Convert a normalized `[-1.0, 1.0]` sample to i16 PCM, clamping overshoot.
fn f32_to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}

/// Write the mono waveform to `path` as a 16-bit PCM WAV file.
fn write_wav_artifact(waveform: &Waveform, path: &Path) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: waveform.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for &sample in waveform.samples() {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}
