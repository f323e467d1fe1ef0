//! Feature vectorization against the model's trained vocabulary.

use std::collections::BTreeSet;

/// Convert a symptom set into a binary feature vector.
///
/// Position `i` is 1 iff `vocabulary[i]` is in the set. Symptoms outside the
/// vocabulary contribute to no position; this is where unvalidated explicit
/// input is silently dropped.
pub fn feature_vector(symptoms: &BTreeSet<String>, vocabulary: &[String]) -> Vec<u8> {
    vocabulary
        .iter()
        .map(|entry| u8::from(symptoms.contains(entry)))
        .collect()
}
