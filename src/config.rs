use std::path::PathBuf;
use std::time::Duration;

/// Options that control a full auditing run.
///
/// This struct represents *library-level configuration*, not CLI flags directly.
/// The CLI is responsible for mapping user input into this type so that:
/// - the library remains reusable outside of a CLI context
/// - other frontends (tests, batch jobs) can construct options programmatically
#[derive(Debug, Clone)]
pub struct Config {
    /// Search query handed to the video discovery collaborator.
    pub query: String,

    /// Maximum number of videos to audit in one run.
    pub max_results: usize,

    /// Target duration of each recognition chunk.
    ///
    /// The last chunk of a video may be shorter; it is never padded or dropped.
    pub chunk_duration: Duration,

    /// The fixed set of terms to search for in each transcript.
    ///
    /// Declaration order is significant: match sets are reported in this
    /// order, regardless of where terms appear in the transcript.
    pub vocabulary: Vec<String>,

    /// Directory that receives per-video transcript files and the final
    /// CSV report. Created if missing.
    pub output_dir: PathBuf,
}

/// Configuration for the cloud speech recognition collaborator.
///
/// Created once at process start and never mutated afterwards; there is no
/// process-global credential state.
#[derive(Debug, Clone)]
pub struct RecognizerConfig {
    /// REST endpoint for the `speech:recognize` method.
    pub endpoint: String,

    /// API key appended to each request.
    pub api_key: String,

    /// BCP-47 language code, fixed for the whole run (e.g. `"pt-BR"`).
    pub language_code: String,
}

impl RecognizerConfig {
    /// Config pointing at the Google Cloud Speech v1 endpoint.
    pub fn google(api_key: impl Into<String>, language_code: impl Into<String>) -> Self {
        Self {
            endpoint: "https://speech.googleapis.com/v1/speech:recognize".to_owned(),
            api_key: api_key.into(),
            language_code: language_code.into(),
        }
    }
}
