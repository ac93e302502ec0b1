//! Vocabulary matching against transcripts.
//!
//! Matching is case- and diacritic-insensitive: both the transcript and
//! every vocabulary term pass through the same [`normalize_text`] function
//! before comparison, so the two sides can never drift apart.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Fold a Unicode string into a lowercase ASCII-range representation.
///
/// Contract:
/// - input: any Unicode string
/// - output: lowercase string containing only ASCII characters, with
///   diacritics removed (NFKD decomposition, combining marks stripped,
///   remaining non-ASCII characters dropped)
///
/// The function is pure and idempotent: applying it twice yields the same
/// result as applying it once.
pub fn normalize_text(text: &str) -> String {
    text.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .filter(char::is_ascii)
        .flat_map(char::to_lowercase)
        .collect()
}

/// Return the vocabulary terms present in `transcript`.
///
/// Matching rule: substring containment of each normalized term in the
/// normalized transcript. No word-boundary awareness: a term that appears
/// inside a longer word still counts (this mirrors the auditing behavior
/// the report consumers expect; it can yield false positives on compound
/// words).
///
/// The result preserves vocabulary declaration order, never transcript
/// appearance order, and contains no duplicates.
pub fn find_matches(vocabulary: &[String], transcript: &str) -> Vec<String> {
    let normalized_transcript = normalize_text(transcript);

    let mut matches: Vec<String> = Vec::new();
    for term in vocabulary {
        let term = normalize_text(term);
        if term.is_empty() || matches.contains(&term) {
            continue;
        }
        if normalized_transcript.contains(term.as_str()) {
            matches.push(term);
        }
    }

    matches
}
