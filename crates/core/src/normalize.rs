//! Symptom normalization: explicit lists, fuzzy free-text matching and
//! synonym substitution.
//!
//! Free text is handled at token level: each word is matched against the
//! vocabulary by normalized edit distance. Multi-word vocabulary entries
//! ("chest pain") are therefore unreachable from a single token; the synonym
//! table is the supported route for common multi-word phrasings. This is a
//! known precision limitation of the matcher, kept as documented behaviour.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use lifeguard_kb::SynonymTable;
use strsim::normalized_levenshtein;

use crate::constants::FUZZY_ACCEPT_SCORE;

/// Split free text into lowercase word tokens.
///
/// Tokens are maximal runs of alphanumeric characters; punctuation and
/// whitespace both delimit.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extract vocabulary symptoms from free text by fuzzy token matching.
///
/// Each token is scored against every vocabulary entry with a normalized
/// edit-distance ratio on a 0-100 scale; the best match is accepted only if
/// its score strictly exceeds [`FUZZY_ACCEPT_SCORE`].
pub fn fuzzy_extract(text: &str, vocabulary: &[String]) -> BTreeSet<String> {
    let mut matched = BTreeSet::new();

    for token in tokenize(text) {
        if let Some((entry, score)) = best_match(&token, vocabulary) {
            if score > FUZZY_ACCEPT_SCORE {
                matched.insert(entry.clone());
            }
        }
    }

    matched
}

fn best_match<'a>(token: &str, vocabulary: &'a [String]) -> Option<(&'a String, f64)> {
    vocabulary
        .iter()
        .map(|entry| (entry, normalized_levenshtein(token, entry) * 100.0))
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
}

/// Extract canonical symptoms whose colloquial phrase occurs in the text.
///
/// Matching is literal substring containment over the lowercased text, not
/// boundary-aware ("tired" inside a longer word still matches). A synonym is
/// only applied when its canonical symptom is part of the model vocabulary.
pub fn synonym_extract(
    text: &str,
    synonyms: &SynonymTable,
    vocabulary: &[String],
) -> BTreeSet<String> {
    let lowered = text.to_lowercase();

    synonyms
        .iter()
        .filter(|(phrase, canonical)| {
            lowered.contains(phrase) && vocabulary.iter().any(|v| v == canonical)
        })
        .map(|(_, canonical)| canonical.to_string())
        .collect()
}

/// Collect the request's symptom set from explicit entries and/or free text.
///
/// Explicit symptoms are taken verbatim with no vocabulary check; entries the
/// model does not know are silently dropped later at vectorization. Free text
/// contributes through both the fuzzy matcher and the synonym table. The
/// result is deduplicated; an empty result means the request carried no
/// usable symptoms.
pub fn collect_symptoms(
    explicit: Option<&[String]>,
    text: Option<&str>,
    vocabulary: &[String],
    synonyms: &SynonymTable,
) -> BTreeSet<String> {
    let mut symptoms = BTreeSet::new();

    if let Some(list) = explicit {
        symptoms.extend(list.iter().cloned());
    }

    if let Some(text) = text {
        symptoms.extend(fuzzy_extract(text, vocabulary));
        symptoms.extend(synonym_extract(text, synonyms, vocabulary));
    }

    symptoms
}
