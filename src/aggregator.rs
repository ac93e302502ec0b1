//! Per-chunk transcription and transcript assembly.
//!
//! The key semantic here is partial-failure tolerance: one bad chunk
//! degrades transcript completeness but never aborts the video or the run.
//! Every chunk produces a fragment (possibly empty), so fragment count
//! always equals chunk count and concatenation order is stable no matter
//! which chunks failed.

use tracing::{info, warn};

use crate::recognizer::{Recognizer, SpeechResult};
use crate::waveform::AudioChunk;

/// Transcribe `chunks` in index order and join the fragments.
///
/// Policy, per chunk:
/// - invoke the recognizer with the chunk's LINEAR16 bytes and `sample_rate`
/// - on error, log it (with the chunk index) and record an empty fragment
/// - on success, keep only the top alternative of each result; a chunk with
///   several speech regions gets them joined with single spaces, in the
///   order returned
///
/// The final transcript is the fragments joined with single spaces, with
/// leading/trailing whitespace trimmed. All chunks failing yields an empty
/// string, not an error.
pub fn transcribe_chunks<R: Recognizer>(
    recognizer: &R,
    chunks: &[AudioChunk<'_>],
    sample_rate: u32,
) -> String {
    let total = chunks.len();
    let mut fragments: Vec<String> = Vec::with_capacity(total);

    for (index, chunk) in chunks.iter().enumerate() {
        info!(chunk = index + 1, total, "transcribing chunk");

        let fragment = match recognizer.recognize(&chunk.linear16_bytes(), sample_rate) {
            Ok(results) => fragment_from_results(&results),
            Err(e) => {
                warn!(chunk = index + 1, total, error = %e, "chunk recognition failed");
                String::new()
            }
        };

        fragments.push(fragment);
    }

    debug_assert_eq!(fragments.len(), chunks.len());
    fragments.join(" ").trim().to_owned()
}

/// Assemble one chunk's fragment from its speech results.
///
/// Only the top-ranked alternative of each result is retained; a result
/// with no alternatives contributes nothing.
fn fragment_from_results(results: &[SpeechResult]) -> String {
    let texts: Vec<&str> = results
        .iter()
        .filter_map(|r| r.alternatives.first())
        .map(|a| a.transcript.as_str())
        .collect();

    texts.join(" ")
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::error::Error;
    use crate::recognizer::SpeechAlternative;
    use crate::waveform::Waveform;

    /// Scripted recognizer: each call pops the next canned outcome.
    struct ScriptedRecognizer {
        outcomes: RefCell<Vec<crate::Result<Vec<SpeechResult>>>>,
    }

    impl ScriptedRecognizer {
        fn new(outcomes: Vec<crate::Result<Vec<SpeechResult>>>) -> Self {
            Self {
                outcomes: RefCell::new(outcomes),
            }
        }
    }

    impl Recognizer for ScriptedRecognizer {
        fn recognize(&self, _linear16: &[u8], _sample_rate: u32) -> crate::Result<Vec<SpeechResult>> {
            self.outcomes.borrow_mut().remove(0)
        }
    }

    fn result_with(texts: &[&str]) -> Vec<SpeechResult> {
        texts
            .iter()
            .map(|t| SpeechResult {
                alternatives: vec![
                    SpeechAlternative {
                        transcript: t.to_string(),
                    },
                    SpeechAlternative {
                        transcript: format!("{t} (worse)"),
                    },
                ],
            })
            .collect()
    }

    fn chunks_of(waveform: &Waveform, chunk_samples: usize) -> Vec<AudioChunk<'_>> {
        crate::segmenter::segment_by_samples(waveform, chunk_samples)
    }

    #[test]
    fn joins_fragments_in_chunk_order() {
        let wave = Waveform::new(vec![0; 400], 100);
        let chunks = chunks_of(&wave, 100);

        let recognizer = ScriptedRecognizer::new(vec![
            Ok(result_with(&["um"])),
            Ok(result_with(&["dois"])),
            Ok(result_with(&["tres"])),
            Ok(result_with(&["quatro"])),
        ]);

        let transcript = transcribe_chunks(&recognizer, &chunks, 100);
        assert_eq!(transcript, "um dois tres quatro");
    }

    #[test]
    fn failed_chunk_becomes_empty_fragment() {
        // 95s at 1 Hz, 30s chunks: [30,30,30,5]. Chunk index 2 fails.
        let wave = Waveform::new(vec![0; 95], 1);
        let chunks = chunks_of(&wave, 30);
        assert_eq!(chunks.len(), 4);

        let recognizer = ScriptedRecognizer::new(vec![
            Ok(result_with(&["a"])),
            Ok(result_with(&["b"])),
            Err(Error::Recognition("backend unavailable".into())),
            Ok(result_with(&["d"])),
        ]);

        // "a" + " " + "b" + " " + "" + " " + "d", trimmed.
        let transcript = transcribe_chunks(&recognizer, &chunks, 1);
        assert_eq!(transcript, "a b  d");
    }

    #[test]
    fn all_chunks_failing_yields_empty_transcript() {
        let wave = Waveform::new(vec![0; 60], 1);
        let chunks = chunks_of(&wave, 30);

        let recognizer = ScriptedRecognizer::new(vec![
            Err(Error::Recognition("boom".into())),
            Err(Error::Recognition("boom".into())),
        ]);

        assert_eq!(transcribe_chunks(&recognizer, &chunks, 1), "");
    }

    #[test]
    fn multiple_speech_regions_concatenate_in_order() {
        let results = result_with(&["bom dia", "boa tarde"]);
        assert_eq!(fragment_from_results(&results), "bom dia boa tarde");
    }

    #[test]
    fn only_top_alternative_is_kept() {
        let results = result_with(&["melhor"]);
        assert_eq!(fragment_from_results(&results), "melhor");
    }

    #[test]
    fn empty_result_set_contributes_nothing() {
        assert_eq!(fragment_from_results(&[]), "");

        let no_alternatives = vec![SpeechResult {
            alternatives: Vec::new(),
        }];
        assert_eq!(fragment_from_results(&no_alternatives), "");
    }
}
