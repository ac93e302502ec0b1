//! Fixed-duration waveform segmentation.
//!
//! Responsibilities:
//! - Partition a normalized waveform into non-overlapping chunks of a
//!   target duration (walking from offset 0 in fixed strides)
//! - Preserve ordering: chunk index defines transcript assembly order
//!
//! The partition is lossless: concatenating all chunks' samples in order
//! reproduces the waveform exactly. The final chunk may be shorter than the
//! target duration; it is never padded and never dropped.

use std::time::Duration;

use crate::waveform::{AudioChunk, Waveform};

/// Split `waveform` into chunks of at most `chunk_duration`.
///
/// A waveform shorter than one chunk duration yields exactly one chunk
/// equal to the whole waveform. An empty waveform yields no chunks.
///
/// Chunk count is always `ceil(duration / chunk_duration)`.
pub fn segment(waveform: &Waveform, chunk_duration: Duration) -> Vec<AudioChunk<'_>> {
    let chunk_samples =
        (chunk_duration.as_secs_f64() * waveform.sample_rate() as f64) as usize;

    segment_by_samples(waveform, chunk_samples)
}

/// Split `waveform` into chunks of at most `chunk_samples` samples.
pub fn segment_by_samples(waveform: &Waveform, chunk_samples: usize) -> Vec<AudioChunk<'_>> {
    assert!(chunk_samples > 0, "chunk duration must be positive");

    waveform
        .samples()
        .chunks(chunk_samples)
        .map(AudioChunk::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn waveform_of_secs(secs: usize, rate: u32) -> Waveform {
        let samples = (0..secs * rate as usize).map(|i| i as i16).collect();
        Waveform::new(samples, rate)
    }

    #[test]
    fn partition_is_lossless() {
        let wave = waveform_of_secs(95, 100);
        let chunks = segment(&wave, Duration::from_secs(30));

        let rejoined: Vec<i16> = chunks
            .iter()
            .flat_map(|c| c.samples().iter().copied())
            .collect();
        assert_eq!(rejoined, wave.samples());
    }

    #[test]
    fn chunk_count_is_ceil_of_duration_ratio() {
        // 95s at 100 Hz with 30s chunks: ceil(95/30) = 4, sized [30,30,30,5].
        let wave = waveform_of_secs(95, 100);
        let chunks = segment(&wave, Duration::from_secs(30));

        assert_eq!(chunks.len(), 4);
        let lens: Vec<usize> = chunks.iter().map(|c| c.samples().len()).collect();
        assert_eq!(lens, vec![3000, 3000, 3000, 500]);
    }

    #[test]
    fn short_waveform_yields_one_whole_chunk() {
        let wave = waveform_of_secs(5, 100);
        let chunks = segment(&wave, Duration::from_secs(30));

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].samples(), wave.samples());
    }

    #[test]
    fn exact_multiple_has_no_trailing_chunk() {
        let wave = waveform_of_secs(60, 100);
        let chunks = segment(&wave, Duration::from_secs(30));

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].samples().len(), 3000);
        assert_eq!(chunks[1].samples().len(), 3000);
    }

    #[test]
    fn empty_waveform_yields_no_chunks() {
        let wave = Waveform::new(Vec::new(), 16_000);
        let chunks = segment(&wave, Duration::from_secs(30));
        assert!(chunks.is_empty());
    }
}
