//! Core audio value types shared by the pipeline stages.
//!
//! A [`Waveform`] is the output of the normalizer: mono 16-bit PCM at the
//! source's native sample rate. An [`AudioChunk`] is a borrowed slice of a
//! waveform, the unit of recognition work.

use std::time::Duration;

/// Decoded, normalized audio for one video.
///
/// Invariant: always mono (the normalizer downmixes before constructing
/// one of these), sample rate preserved from the source.
#[derive(Debug, Clone)]
pub struct Waveform {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl Waveform {
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration of the waveform (mono, so samples == frames).
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.samples.len() as f64 / self.sample_rate as f64)
    }
}

/// A contiguous slice of a waveform with a fixed nominal duration.
///
/// Chunks are ordered; the chunk index defines the position of its
/// transcript fragment in the final transcript.
#[derive(Debug, Clone, Copy)]
pub struct AudioChunk<'a> {
    samples: &'a [i16],
}

impl<'a> AudioChunk<'a> {
    pub fn new(samples: &'a [i16]) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &'a [i16] {
        self.samples
    }

    /// Raw LINEAR16 bytes (little-endian), the payload format the
    /// recognition capability expects.
    pub fn linear16_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.samples.len() * 2);
        for sample in self.samples {
            bytes.extend_from_slice(&sample.to_le_bytes());
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_uses_sample_rate() {
        let wave = Waveform::new(vec![0; 32_000], 16_000);
        assert_eq!(wave.duration(), Duration::from_secs(2));
    }

    #[test]
    fn linear16_bytes_are_little_endian() {
        let samples = [1i16, -2, 256];
        let chunk = AudioChunk::new(&samples);
        assert_eq!(chunk.linear16_bytes(), vec![1, 0, 254, 255, 0, 1]);
    }
}
