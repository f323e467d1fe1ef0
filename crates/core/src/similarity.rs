//! Disease similarity grouping over symptom profiles.

use std::collections::BTreeSet;

use lifeguard_kb::DiseaseProfiles;

use crate::constants::SIMILARITY_THRESHOLD;

/// Jaccard similarity of two symptom sets. An empty union is defined as 0.
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    intersection as f64 / union as f64
}

/// Diseases whose symptom profile overlaps `disease`'s at or above the
/// grouping threshold.
///
/// The disease itself is never included. A disease absent from the profile
/// map has an empty profile, so its group is empty. This depends only on the
/// static map, so it is a pure function of `(disease, profiles)`; it is
/// recomputed on every call rather than cached.
pub fn similar_diseases(disease: &str, profiles: &DiseaseProfiles) -> Vec<String> {
    let empty = BTreeSet::new();
    let target = profiles.profile(disease).unwrap_or(&empty);

    profiles
        .iter()
        .filter(|(other, _)| other.as_str() != disease)
        .filter(|(_, profile)| jaccard(target, profile) >= SIMILARITY_THRESHOLD)
        .map(|(other, _)| other.clone())
        .collect()
}
