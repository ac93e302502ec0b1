//! Speech recognition seam.
//!
//! The pipeline only depends on the [`Recognizer`] trait; the production
//! implementation ([`CloudRecognizer`]) POSTs LINEAR16 audio to the Google
//! Cloud Speech `speech:recognize` REST method. Tests substitute scripted
//! implementations to exercise the aggregator's failure policy without any
//! network access.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use serde::{Deserialize, Serialize};

use crate::config::RecognizerConfig;
use crate::error::{Error, Result};

/// One recognized speech region within a chunk, with ranked alternatives.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechResult {
    /// Alternatives ordered best-first; only the top one is used for
    /// transcript assembly.
    #[serde(default)]
    pub alternatives: Vec<SpeechAlternative>,
}

/// A candidate transcription for one speech region.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechAlternative {
    #[serde(default)]
    pub transcript: String,
}

/// Pluggable speech recognition capability.
///
/// A recognizer turns raw LINEAR16 little-endian bytes at a given sample
/// rate into ordered speech results. The target language is fixed at
/// construction time, not per call.
///
/// Contract notes:
/// - A call blocks until the capability returns or errors; this core adds
///   no caller-side timeout.
/// - Errors are chunk-scoped by the caller: returning `Err` must never be
///   treated as fatal beyond the chunk being recognized.
pub trait Recognizer {
    fn recognize(&self, linear16: &[u8], sample_rate: u32) -> Result<Vec<SpeechResult>>;
}

/// Google Cloud Speech REST recognizer.
///
/// Holds a long-lived blocking HTTP client plus the per-run configuration
/// (endpoint, API key, language code). Construct once, reuse across every
/// chunk of every video.
pub struct CloudRecognizer {
    client: reqwest::blocking::Client,
    config: RecognizerConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognizeRequest<'a> {
    config: RequestConfig<'a>,
    audio: RequestAudio,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestConfig<'a> {
    encoding: &'static str,
    sample_rate_hertz: u32,
    language_code: &'a str,
}

#[derive(Serialize)]
struct RequestAudio {
    content: String,
}

#[derive(Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<SpeechResult>,
}

impl CloudRecognizer {
    pub fn new(config: RecognizerConfig) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            config,
        }
    }

    fn request_body(&self, linear16: &[u8], sample_rate: u32) -> RecognizeRequest<'_> {
        RecognizeRequest {
            config: RequestConfig {
                encoding: "LINEAR16",
                sample_rate_hertz: sample_rate,
                language_code: &self.config.language_code,
            },
            audio: RequestAudio {
                content: BASE64_STANDARD.encode(linear16),
            },
        }
    }
}

impl Recognizer for CloudRecognizer {
    fn recognize(&self, linear16: &[u8], sample_rate: u32) -> Result<Vec<SpeechResult>> {
        let body = self.request_body(linear16, sample_rate);

        let response = self
            .client
            .post(&self.config.endpoint)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(Error::Recognition(format!(
                "recognize returned HTTP {status}: {detail}"
            )));
        }

        let parsed: RecognizeResponse = response
            .json()
            .map_err(|e| Error::Recognition(format!("malformed recognize response: {e}")))?;

        Ok(parsed.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_encodes_audio_and_fixed_language() {
        let recognizer = CloudRecognizer::new(RecognizerConfig::google("k", "pt-BR"));
        let body = recognizer.request_body(&[0x01, 0x02], 44_100);

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["config"]["encoding"], "LINEAR16");
        assert_eq!(json["config"]["sampleRateHertz"], 44_100);
        assert_eq!(json["config"]["languageCode"], "pt-BR");
        assert_eq!(json["audio"]["content"], "AQI=");
    }

    #[test]
    fn response_parsing_tolerates_missing_fields() {
        let parsed: RecognizeResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.results.is_empty());

        let parsed: RecognizeResponse = serde_json::from_str(
            r#"{"results":[{"alternatives":[{"transcript":"bom dia","confidence":0.9}]}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.results[0].alternatives[0].transcript, "bom dia");
    }
}
