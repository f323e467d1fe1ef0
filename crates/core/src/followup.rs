//! Follow-up symptom generation.

use std::collections::BTreeSet;

use lifeguard_kb::DiseaseProfiles;

use crate::rank::Prediction;

/// Symptoms worth asking about next: the union of the top predictions'
/// symptom profiles, minus everything the caller already reported.
///
/// Diseases without a profile contribute nothing. Callers get symptom names
/// to ask about, not phrased questions, and must not rely on any particular
/// ordering (the current implementation happens to return sorted output).
pub fn follow_up_symptoms(
    predictions: &[Prediction],
    confirmed: &BTreeSet<String>,
    profiles: &DiseaseProfiles,
) -> Vec<String> {
    let mut candidates = BTreeSet::new();

    for prediction in predictions {
        if let Some(profile) = profiles.profile(&prediction.disease) {
            for symptom in profile {
                if !confirmed.contains(symptom) {
                    candidates.insert(symptom.clone());
                }
            }
        }
    }

    candidates.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn prediction(disease: &str) -> Prediction {
        Prediction {
            disease: disease.into(),
            confidence: 0.5,
            medications: vec![],
        }
    }

    fn profiles(entries: &[(&str, &[&str])]) -> DiseaseProfiles {
        DiseaseProfiles::from_map(
            entries
                .iter()
                .map(|(disease, symptoms)| {
                    (
                        disease.to_string(),
                        symptoms.iter().map(|s| s.to_string()).collect(),
                    )
                })
                .collect::<BTreeMap<_, _>>(),
        )
    }

    #[test]
    fn proposes_unconfirmed_profile_symptoms() {
        let profiles = profiles(&[
            ("Malaria", &["fever", "chills", "sweating"]),
            ("Influenza", &["fever", "sore throat"]),
        ]);
        let confirmed: BTreeSet<String> = ["fever".to_string()].into();

        let follow_ups = follow_up_symptoms(
            &[prediction("Malaria"), prediction("Influenza")],
            &confirmed,
            &profiles,
        );

        assert_eq!(follow_ups, ["chills", "sore throat", "sweating"]);
    }

    #[test]
    fn never_repeats_confirmed_symptoms() {
        let profiles = profiles(&[("Malaria", &["fever", "chills"])]);
        let confirmed: BTreeSet<String> =
            ["fever".to_string(), "chills".to_string()].into();

        let follow_ups = follow_up_symptoms(&[prediction("Malaria")], &confirmed, &profiles);
        assert!(follow_ups.is_empty());
    }

    #[test]
    fn unknown_disease_contributes_nothing() {
        let profiles = profiles(&[("Malaria", &["fever"])]);

        let follow_ups =
            follow_up_symptoms(&[prediction("Ebola")], &BTreeSet::new(), &profiles);
        assert!(follow_ups.is_empty());
    }
}
