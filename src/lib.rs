//! `fishscan` — audits short-form videos for mentions of a fixed vocabulary.
//!
//! This crate provides:
//! - Video discovery and download seams (yt-dlp backed)
//! - Audio extraction and mono normalization (Symphonia)
//! - Fixed-duration segmentation and per-chunk cloud transcription with
//!   partial-failure tolerance
//! - Diacritic-insensitive vocabulary matching
//! - Per-video transcript files and a CSV run report
//!
//! Processing is deliberately sequential and synchronous: one video at a
//! time, one chunk at a time, so a single bad chunk or video never costs
//! more than its own slot in the run.

// High-level API (most consumers should start here).
pub mod config;
pub mod pipeline;

// Crate-wide error type.
pub mod error;

// Audio extraction and normalization.
pub mod extract;
pub mod normalizer;
pub mod waveform;

// The segmented transcription core.
pub mod aggregator;
pub mod recognizer;
pub mod segmenter;

// Transcript analysis.
pub mod matcher;

// External collaborators (discovery, download) and run output.
pub mod downloader;
pub mod report;
pub mod search;

// Logging configuration for the CLI.
#[cfg(feature = "logging")]
pub mod logging;

pub use error::{Error, Result};
