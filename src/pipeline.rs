//! High-level orchestration: drive each discovered video from download to
//! report record.
//!
//! The intent is:
//! - Construct the pipeline once with its three collaborators (search,
//!   download, recognition) and the run configuration.
//! - Call `run` to process every discovered video strictly in order,
//!   end-to-end, one at a time.
//!
//! Each video walks an explicit state machine
//! (`Downloaded → AudioExtracted → Normalized → Segmented → Transcribed →
//! Matched → Reported`); any download/extraction/normalization error sends
//! it to the terminal `Failed` state, which short-circuits that video only.
//! Failed videos produce no report row. Scratch artifacts are removed once
//! a video reaches `Reported` or `Failed`, whichever comes first.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::downloader::Downloader;
use crate::recognizer::Recognizer;
use crate::report::{self, ReportRecord};
use crate::search::{VideoHit, VideoSearch};
use crate::{aggregator, matcher, normalizer, segmenter};

/// Name of the CSV report written into the output directory.
pub const REPORT_FILE_NAME: &str = "results.csv";

/// Per-video processing states.
///
/// `Failed` is terminal and reachable from any state before `Reported`;
/// every other transition is strictly forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Downloaded,
    AudioExtracted,
    Normalized,
    Segmented,
    Transcribed,
    Matched,
    Reported,
    Failed,
}

/// The auditing pipeline, generic over its external collaborators.
///
/// Production runs use [`crate::search::YtDlpSearch`],
/// [`crate::downloader::YtDlpDownloader`] and
/// [`crate::recognizer::CloudRecognizer`]; tests substitute scripted
/// implementations.
pub struct Pipeline<S, D, R> {
    search: S,
    downloader: D,
    recognizer: R,
    config: Config,
}

impl<S, D, R> Pipeline<S, D, R>
where
    S: VideoSearch,
    D: Downloader,
    R: Recognizer,
{
    pub fn new(search: S, downloader: D, recognizer: R, config: Config) -> Self {
        Self {
            search,
            downloader,
            recognizer,
            config,
        }
    }

    /// Run a full audit: discover, process each video in order, write the
    /// report.
    ///
    /// Discovery failures are soft: they degrade to "no videos found" and
    /// the run ends cleanly with an empty (but well-formed) report. Per-
    /// video failures are logged and skipped. The returned records match
    /// the rows written to the CSV.
    pub fn run(&self) -> crate::Result<Vec<ReportRecord>> {
        fs::create_dir_all(&self.config.output_dir)?;

        // One scratch directory per run, reused sequentially across videos.
        let scratch = TempDir::new()?;
        debug!(scratch = %scratch.path().display(), "created scratch directory");

        let hits = match self.search.search(&self.config.query, self.config.max_results) {
            Ok(hits) => hits,
            Err(e) => {
                warn!(error = %e, "video discovery failed; treating as no results");
                Vec::new()
            }
        };

        if hits.is_empty() {
            info!("no videos found");
        }

        let mut records = Vec::new();
        for (index, hit) in hits.iter().enumerate() {
            let video_id = format!("video{:02}", index + 1);
            info!(video = %video_id, title = %hit.title, url = %hit.url, "processing video");

            match self.process_video(&video_id, hit, scratch.path()) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(video = %video_id, url = %hit.url, error = %e, "video failed; skipping");
                }
            }
        }

        let report_path = self.config.output_dir.join(REPORT_FILE_NAME);
        report::write_report(&records, &report_path)?;

        Ok(records)
    }

    /// Drive one video through the state machine, cleaning up scratch
    /// artifacts on every outcome.
    fn process_video(
        &self,
        video_id: &str,
        hit: &VideoHit,
        scratch: &Path,
    ) -> crate::Result<ReportRecord> {
        let artifact_path = scratch.join("audio.wav");
        let mut media_path: Option<PathBuf> = None;

        let result = self.drive(video_id, hit, scratch, &artifact_path, &mut media_path);

        // Cleanup runs whether the video reached `Reported` or `Failed`.
        if let Some(path) = media_path {
            if let Err(e) = fs::remove_file(&path) {
                warn!(path = %path.display(), error = %e, "failed to remove downloaded media");
            }
        }
        if artifact_path.exists() {
            if let Err(e) = fs::remove_file(&artifact_path) {
                warn!(path = %artifact_path.display(), error = %e, "failed to remove audio artifact");
            }
        }

        if result.is_err() {
            debug!(video = %video_id, stage = ?Stage::Failed, "state transition");
        }

        result
    }

    fn drive(
        &self,
        video_id: &str,
        hit: &VideoHit,
        scratch: &Path,
        artifact_path: &Path,
        media_path: &mut Option<PathBuf>,
    ) -> crate::Result<ReportRecord> {
        let mut stage;

        let media = self.downloader.download(&hit.url, scratch)?;
        *media_path = Some(media.clone());
        stage = Stage::Downloaded;
        debug!(video = %video_id, ?stage, "state transition");

        let waveform = normalizer::extract_audio(&media)?;
        stage = Stage::AudioExtracted;
        debug!(video = %video_id, ?stage, "state transition");

        normalizer::write_artifact(&waveform, artifact_path)?;
        stage = Stage::Normalized;
        debug!(video = %video_id, ?stage, "state transition");

        let chunks = segmenter::segment(&waveform, self.config.chunk_duration);
        stage = Stage::Segmented;
        debug!(video = %video_id, ?stage, chunks = chunks.len(), "state transition");

        let transcript =
            aggregator::transcribe_chunks(&self.recognizer, &chunks, waveform.sample_rate());
        stage = Stage::Transcribed;
        debug!(video = %video_id, ?stage, "state transition");

        let matches = matcher::find_matches(&self.config.vocabulary, &transcript);
        stage = Stage::Matched;
        debug!(video = %video_id, ?stage, matched = matches.len(), "state transition");

        let transcript_file =
            report::save_transcript(&transcript, &self.config.output_dir, video_id)?;
        let record = ReportRecord::new(video_id, &hit.url, &matches, transcript_file);
        stage = Stage::Reported;
        debug!(video = %video_id, ?stage, "state transition");

        Ok(record)
    }
}
