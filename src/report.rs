//! Run output: per-video transcript files and the final CSV report.
//!
//! Transcripts are written as soon as a video's transcription completes;
//! the report is written exactly once, after every video has been processed
//! or skipped. An empty run still produces a well-formed (header-only) CSV.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::Result;

/// One per-video summary row in the final report.
///
/// Created after a video's transcript and match set are both available;
/// immutable thereafter. Videos that fail before transcription never get a
/// record.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRecord {
    /// Sequential identifier assigned by the orchestrator (`video01`, …).
    pub video: String,

    /// Source URL, as discovered.
    pub url: String,

    /// Comma-joined matched vocabulary terms, in vocabulary order.
    pub matched_terms: String,

    /// Path of the persisted transcript file.
    pub transcript_file: PathBuf,
}

impl ReportRecord {
    pub fn new(
        video_id: impl Into<String>,
        url: impl Into<String>,
        matches: &[String],
        transcript_file: PathBuf,
    ) -> Self {
        Self {
            video: video_id.into(),
            url: url.into(),
            matched_terms: matches.join(", "),
            transcript_file,
        }
    }
}

/// Persist one video's transcript as a UTF-8 text file named after its id.
///
/// Returns the path of the written file.
pub fn save_transcript(transcript: &str, output_dir: &Path, video_id: &str) -> Result<PathBuf> {
    let path = output_dir.join(format!("{video_id}.txt"));
    fs::write(&path, transcript)?;

    info!(path = %path.display(), "saved transcript");
    Ok(path)
}

/// Write the run's report rows to `path` as CSV.
///
/// Always writes the header, even for zero rows.
pub fn write_report(records: &[ReportRecord], path: &Path) -> Result<()> {
    // Write the header ourselves: `serialize` only emits it before the first
    // row, which would leave an empty run with an empty file instead of a
    // well-formed empty table.
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(["video", "url", "matched_terms", "transcript_file"])?;

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = records.len(), "saved report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_transcript_names_file_after_video_id() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = save_transcript("bom dia", dir.path(), "video01")?;

        assert_eq!(path, dir.path().join("video01.txt"));
        assert_eq!(fs::read_to_string(&path)?, "bom dia");
        Ok(())
    }

    #[test]
    fn report_rows_serialize_in_order() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("results.csv");

        let records = vec![
            ReportRecord::new(
                "video01",
                "https://example.test/v1",
                &["pirarucu".to_owned(), "pacu".to_owned()],
                dir.path().join("video01.txt"),
            ),
            ReportRecord::new(
                "video02",
                "https://example.test/v2",
                &[],
                dir.path().join("video02.txt"),
            ),
        ];

        write_report(&records, &path)?;

        let contents = fs::read_to_string(&path)?;
        let mut lines = contents.lines();
        assert_eq!(
            lines.next(),
            Some("video,url,matched_terms,transcript_file")
        );
        assert!(lines.next().unwrap().contains("pirarucu, pacu"));
        assert!(lines.next().unwrap().starts_with("video02,"));
        Ok(())
    }

    #[test]
    fn empty_run_still_writes_header() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("results.csv");

        write_report(&[], &path)?;

        let contents = fs::read_to_string(&path)?;
        assert_eq!(contents.trim(), "video,url,matched_terms,transcript_file");
        Ok(())
    }
}
