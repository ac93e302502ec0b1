//! Container probing and codec decoding for downloaded media files.
//!
//! [`AudioTrackReader`] wraps Symphonia's probe/demux/decode machinery
//! behind a small pull interface: open a file, then repeatedly ask for the
//! next decoded audio buffer until the track runs out. Codec edge cases
//! (bad frames, truncated streams) are handled here so the normalizer can
//! stay a straight-line accumulation loop.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use symphonia::core::audio::AudioBufferRef;
use symphonia::core::codecs::{CODEC_TYPE_NULL, Decoder, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Pull-based decoder for the default audio track of a media file.
pub struct AudioTrackReader {
    format: Box<dyn FormatReader>,
    decoder: Box<dyn Decoder>,
    track_id: u32,
}

impl AudioTrackReader {
    /// Open `path`, probe its container and prepare the default audio track
    /// for decoding.
    ///
    /// Track selection policy:
    /// - choose the first track that looks decodable (codec != NULL)
    /// - and has a known sample rate (the pipeline preserves the source
    ///   rate, so it must be known up front)
    ///
    /// The file's extension is passed to the probe as a hint. Files are
    /// opened seekably, so containers with trailing metadata (common for
    /// MP4 downloads) probe fine.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open media file '{}'", path.display()))?;

        let mss_opts = MediaSourceStreamOptions {
            // Symphonia expects a power-of-two buffer > 32KiB for good probing behavior.
            buffer_len: 256 * 1024,
        };
        let mss = MediaSourceStream::new(Box::new(file), mss_opts);

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let format_opts: FormatOptions = Default::default();
        let metadata_opts: MetadataOptions = Default::default();

        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &format_opts, &metadata_opts)
            .map_err(|e| anyhow!(e))
            .context("failed to probe media file")?;

        let format = probed.format;

        let track = format
            .tracks()
            .iter()
            .find(|t| {
                t.codec_params.codec != CODEC_TYPE_NULL && t.codec_params.sample_rate.is_some()
            })
            .cloned()
            .ok_or_else(|| anyhow!("no decodable audio track found"))?;

        let decoder_opts: DecoderOptions = Default::default();
        let decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &decoder_opts)
            .map_err(|e| anyhow!(e))
            .context("failed to create decoder for audio track")?;

        Ok(Self {
            format,
            decoder,
            track_id: track.id,
        })
    }

    /// Decode forward until one audio buffer is produced and hand it to
    /// `on_decoded`.
    ///
    /// Return value semantics:
    /// - `Ok(true)`  → a buffer was decoded and the callback ran
    /// - `Ok(false)` → the track ended; no further buffers will come
    /// - `Err(_)`    → fatal demux or decoder error
    ///
    /// Error handling policy:
    /// - packets from other tracks (video frames, subtitles) are skipped
    /// - `DecodeError` → skip the bad frame and keep going (common with
    ///   some codecs)
    /// - `IoError` from demux or decode → treat as end-of-stream
    /// - anything else → bubble up with context
    pub fn decode_next(
        &mut self,
        mut on_decoded: impl FnMut(&AudioBufferRef<'_>) -> Result<()>,
    ) -> Result<bool> {
        loop {
            let packet = match self.format.next_packet() {
                Ok(p) => p,
                Err(SymphoniaError::IoError(_)) => return Ok(false),
                Err(e) => return Err(anyhow!(e)).context("failed reading packet"),
            };

            if packet.track_id() != self.track_id {
                continue;
            }

            match self.decoder.decode(&packet) {
                Ok(buf) => {
                    on_decoded(&buf)?;
                    return Ok(true);
                }

                // Recoverable: corrupted frame, but decoding can continue.
                Err(SymphoniaError::DecodeError(_)) => continue,

                // Treat IO errors as graceful end-of-stream.
                Err(SymphoniaError::IoError(_)) => return Ok(false),

                // Anything else is considered fatal.
                Err(e) => return Err(anyhow!(e)).context("decoder failure"),
            }
        }
    }
}
