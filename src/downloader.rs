//! Media download seam.
//!
//! Like discovery, downloading is delegated to `yt-dlp`. A download failure
//! is video-scoped: the orchestrator marks that video `Failed` and moves on.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{Error, Result};

/// Pluggable media download capability.
///
/// `download` retrieves `url` into `dest_dir` and returns the path of the
/// local media file.
pub trait Downloader {
    fn download(&self, url: &str, dest_dir: &Path) -> Result<PathBuf>;
}

/// `yt-dlp`-backed downloader.
///
/// We let yt-dlp pick the container and ask it to print the final file path
/// (`--print after_move:filepath`), which is robust against its own naming
/// and merge behavior.
pub struct YtDlpDownloader;

impl Downloader for YtDlpDownloader {
    fn download(&self, url: &str, dest_dir: &Path) -> Result<PathBuf> {
        let template = dest_dir.join("%(id)s.%(ext)s");

        let output = Command::new("yt-dlp")
            .arg("--format")
            .arg("best")
            .arg("--output")
            .arg(&template)
            .arg("--no-simulate")
            .arg("--print")
            .arg("after_move:filepath")
            .arg(url)
            .output()
            .map_err(|e| download_error(url, format!("failed to run yt-dlp: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(download_error(
                url,
                format!("yt-dlp exited with {}: {}", output.status, stderr.trim()),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let path = resolve_downloaded_path(&stdout)
            .ok_or_else(|| download_error(url, "yt-dlp reported no output file".to_owned()))?;

        if !path.is_file() {
            return Err(download_error(
                url,
                format!("reported file '{}' does not exist", path.display()),
            ));
        }

        debug!(url, path = %path.display(), "download completed");
        Ok(path)
    }
}

fn download_error(url: &str, reason: String) -> Error {
    Error::Download {
        url: url.to_owned(),
        reason,
    }
}

/// The printed filepath is the last non-empty stdout line.
fn resolve_downloaded_path(stdout: &str) -> Option<PathBuf> {
    stdout
        .lines()
        .rev()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_last_non_empty_line() {
        let stdout = "warning: something\n/tmp/run/abc123.mp4\n\n";
        assert_eq!(
            resolve_downloaded_path(stdout),
            Some(PathBuf::from("/tmp/run/abc123.mp4"))
        );
    }

    #[test]
    fn empty_stdout_resolves_to_none() {
        assert_eq!(resolve_downloaded_path("\n\n"), None);
    }
}
