//! Top-K ranking of classifier output with medication lookups.

use std::cmp::Ordering;

use lifeguard_kb::MedicationsTable;
use serde::{Deserialize, Serialize};

use crate::constants::TOP_K;

/// One ranked disease candidate.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Prediction {
    /// Disease label as known to the classifier.
    pub disease: String,

    /// Probability assigned by the classifier, in `[0, 1]`.
    pub confidence: f64,

    /// Medication names from the medications table; empty when the disease
    /// has no entry there.
    pub medications: Vec<String>,
}

/// Select the top-K classes by probability and attach medications.
///
/// `probabilities` aligns with `classes` by index. Sorting is by descending
/// probability; exact ties order lexicographically by disease label, so the
/// ranking is deterministic regardless of the classifier's native class
/// order.
pub fn top_predictions(
    probabilities: &[f64],
    classes: &[String],
    medications: &MedicationsTable,
) -> Vec<Prediction> {
    let mut ranked: Vec<(usize, f64)> = probabilities.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| classes[a.0].cmp(&classes[b.0]))
    });

    ranked
        .into_iter()
        .take(TOP_K)
        .map(|(index, confidence)| Prediction {
            disease: classes[index].clone(),
            confidence,
            medications: medications.for_disease(&classes[index]).to_vec(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    fn meds(entries: &[(&str, &[&str])]) -> MedicationsTable {
        MedicationsTable::from_entries(entries.iter().map(|(disease, medications)| {
            (
                disease.to_string(),
                medications.iter().map(|m| m.to_string()).collect(),
            )
        }))
        .expect("no duplicates")
    }

    #[test]
    fn returns_at_most_three_sorted_descending() {
        let labels = classes(&["Anemia", "Asthma", "Malaria", "Migraine"]);
        let table = meds(&[]);

        let predictions = top_predictions(&[0.1, 0.4, 0.3, 0.2], &labels, &table);
        assert_eq!(predictions.len(), 3);
        assert_eq!(predictions[0].disease, "Asthma");
        assert_eq!(predictions[1].disease, "Malaria");
        assert_eq!(predictions[2].disease, "Migraine");
        assert!(predictions.windows(2).all(|w| w[0].confidence >= w[1].confidence));
    }

    #[test]
    fn returns_all_classes_when_fewer_than_three() {
        let labels = classes(&["Anemia", "Asthma"]);
        let table = meds(&[]);

        let predictions = top_predictions(&[0.6, 0.4], &labels, &table);
        assert_eq!(predictions.len(), 2);
    }

    #[test]
    fn ties_order_lexicographically() {
        let labels = classes(&["Migraine", "Anemia", "Malaria"]);
        let table = meds(&[]);

        let predictions = top_predictions(&[0.25, 0.25, 0.5], &labels, &table);
        assert_eq!(predictions[0].disease, "Malaria");
        assert_eq!(predictions[1].disease, "Anemia");
        assert_eq!(predictions[2].disease, "Migraine");
    }

    #[test]
    fn attaches_medications_with_empty_fallback() {
        let labels = classes(&["Influenza", "Malaria"]);
        let table = meds(&[("Malaria", &["Chloroquine", "Primaquine"])]);

        let predictions = top_predictions(&[0.3, 0.7], &labels, &table);
        assert_eq!(predictions[0].medications, ["Chloroquine", "Primaquine"]);
        assert!(predictions[1].medications.is_empty());
    }
}
