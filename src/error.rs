use thiserror::Error;

/// Fishscan's crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Fishscan's crate-wide error type.
///
/// Variants map onto the recovery scope the pipeline applies:
/// - [`Error::Recognition`] is chunk-scoped: the aggregator maps it to an
///   empty transcript fragment and keeps going.
/// - [`Error::Download`], [`Error::Extraction`] and [`Error::Normalization`]
///   are video-scoped: that video transitions to `Failed`, the run continues.
/// - [`Error::Discovery`] is run-scoped but soft: the orchestrator treats it
///   as an empty result set.
/// - [`Error::Report`] and [`Error::Io`] surface from the persistence sinks.
///
/// No variant is ever fatal to the process.
#[derive(Debug, Error)]
pub enum Error {
    #[error("video discovery failed: {0}")]
    Discovery(String),

    #[error("download failed for '{url}': {reason}")]
    Download { url: String, reason: String },

    #[error("audio extraction failed: {0}")]
    Extraction(String),

    #[error("audio normalization failed: {0}")]
    Normalization(String),

    #[error("speech recognition failed: {0}")]
    Recognition(String),

    #[error("report persistence failed: {0}")]
    Report(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Self::Report(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Recognition(err.to_string())
    }
}
