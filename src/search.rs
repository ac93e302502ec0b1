//! Video discovery seam.
//!
//! The pipeline depends only on the [`VideoSearch`] trait. The production
//! implementation shells out to `yt-dlp`, which handles the search backend
//! and its churn; this crate owns no scraping logic of its own.

use std::process::Command;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// One discovered video candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoHit {
    pub title: String,
    pub url: String,
}

/// Pluggable video discovery capability.
///
/// Implementations return hits in relevance order; the pipeline processes
/// them strictly in that order. Errors are soft at the run level: the
/// orchestrator maps them to "no videos found" and ends the run cleanly.
pub trait VideoSearch {
    fn search(&self, query: &str, max_results: usize) -> Result<Vec<VideoHit>>;
}

/// `yt-dlp`-backed search (`ytsearchN:<query>`, flat playlist, one JSON
/// object per line on stdout).
pub struct YtDlpSearch;

#[derive(Deserialize)]
struct SearchEntry {
    #[serde(default)]
    title: String,
    url: Option<String>,
    webpage_url: Option<String>,
}

impl VideoSearch for YtDlpSearch {
    fn search(&self, query: &str, max_results: usize) -> Result<Vec<VideoHit>> {
        let selector = format!("ytsearch{max_results}:{query}");

        let output = Command::new("yt-dlp")
            .arg("--flat-playlist")
            .arg("--dump-json")
            .arg(&selector)
            .output()
            .map_err(|e| Error::Discovery(format!("failed to run yt-dlp: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Discovery(format!(
                "yt-dlp exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let hits = parse_search_output(&stdout)?;
        debug!(query, found = hits.len(), "video search completed");
        Ok(hits)
    }
}

/// Parse yt-dlp's line-delimited JSON search output.
///
/// Entries without a resolvable URL are skipped rather than failing the
/// whole search.
fn parse_search_output(stdout: &str) -> Result<Vec<VideoHit>> {
    let mut hits = Vec::new();

    for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
        let entry: SearchEntry = serde_json::from_str(line)
            .map_err(|e| Error::Discovery(format!("unparseable search entry: {e}")))?;

        let Some(url) = entry.webpage_url.or(entry.url) else {
            continue;
        };

        hits.push(VideoHit {
            title: entry.title,
            url,
        });
    }

    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_line_delimited_entries() {
        let stdout = concat!(
            r#"{"title":"Pesca com ceva 1","url":"https://example.test/v1"}"#,
            "\n",
            r#"{"title":"Pesca com ceva 2","webpage_url":"https://example.test/v2"}"#,
            "\n",
        );

        let hits = parse_search_output(stdout).unwrap();
        assert_eq!(
            hits,
            vec![
                VideoHit {
                    title: "Pesca com ceva 1".into(),
                    url: "https://example.test/v1".into(),
                },
                VideoHit {
                    title: "Pesca com ceva 2".into(),
                    url: "https://example.test/v2".into(),
                },
            ]
        );
    }

    #[test]
    fn entries_without_urls_are_skipped() {
        let stdout = r#"{"title":"no link here"}"#;
        let hits = parse_search_output(stdout).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn garbage_output_is_a_discovery_error() {
        let err = parse_search_output("not json").unwrap_err();
        assert!(matches!(err, Error::Discovery(_)));
    }

    #[test]
    fn empty_output_yields_no_hits() {
        assert!(parse_search_output("").unwrap().is_empty());
    }
}
