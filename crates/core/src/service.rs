//! Triage service: the shared scoring pipeline behind both entry points.

use std::collections::{BTreeMap, BTreeSet};

use lifeguard_kb::KnowledgeBase;
use lifeguard_model::Classifier;
use serde::{Deserialize, Serialize};

use crate::rank::Prediction;
use crate::{followup, normalize, rank, similarity, vectorize};
use crate::{CoreConfig, TriageError, TriageResult};

/// Result of one triage request.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Assistance {
    /// The deduplicated symptom set the pipeline actually scored, including
    /// explicit entries the model may not know.
    pub input_symptoms: Vec<String>,

    /// Top-ranked disease candidates with medications attached.
    pub top_predictions: Vec<Prediction>,

    /// Symptoms worth asking about to refine the prediction.
    pub follow_up_questions: Vec<String>,

    /// For each top prediction, other diseases with overlapping profiles.
    pub similar_disease_groups: BTreeMap<String, Vec<String>>,
}

/// Stateless triage operations over read-only state loaded at startup.
///
/// One instance is shared across all requests; nothing here mutates after
/// construction, so the service can be used from any number of threads
/// without coordination.
#[derive(Debug)]
pub struct TriageService {
    classifier: Classifier,
    kb: KnowledgeBase,
}

impl TriageService {
    /// Create a service from an already-loaded classifier and knowledge base.
    pub fn new(classifier: Classifier, kb: KnowledgeBase) -> Self {
        Self { classifier, kb }
    }

    /// Load the classifier artifact and knowledge base named by `cfg`.
    ///
    /// Any failure here is startup-fatal by design: the caller must not start
    /// serving with partial state.
    pub fn from_config(cfg: &CoreConfig) -> TriageResult<Self> {
        let classifier = Classifier::load(cfg.model_path()).map_err(TriageError::ModelLoad)?;
        let kb = KnowledgeBase::load(cfg.kb_dir())?;

        tracing::info!(
            classes = classifier.classes().len(),
            vocabulary = classifier.vocabulary().len(),
            profiles = kb.profiles.len(),
            "loaded classifier artifact and knowledge base"
        );

        Ok(Self::new(classifier, kb))
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn kb(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// Score a request given explicit symptoms and/or free text.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::InvalidInput`] when normalization yields no
    /// symptoms at all, and [`TriageError::Classify`] when the classifier
    /// rejects the feature vector.
    pub fn assist(
        &self,
        symptoms: Option<&[String]>,
        text: Option<&str>,
    ) -> TriageResult<Assistance> {
        let collected = normalize::collect_symptoms(
            symptoms,
            text,
            self.classifier.vocabulary(),
            &self.kb.synonyms,
        );

        if collected.is_empty() {
            return Err(TriageError::InvalidInput(
                "no valid symptoms detected".into(),
            ));
        }

        self.score(collected)
    }

    /// Re-score after follow-up answers.
    ///
    /// Symptoms answered `true` merge into the initial set; `false` answers
    /// are ignored and never remove a symptom, so the effective set is always
    /// a superset of the initial one.
    pub fn recalibrate(
        &self,
        initial_symptoms: &[String],
        follow_up_answers: &BTreeMap<String, bool>,
    ) -> TriageResult<Assistance> {
        let mut symptoms: BTreeSet<String> = initial_symptoms.iter().cloned().collect();

        for (symptom, &confirmed) in follow_up_answers {
            if confirmed {
                symptoms.insert(symptom.clone());
            }
        }

        self.score(symptoms)
    }

    /// The shared vectorize → classify → rank → derive pipeline.
    fn score(&self, symptoms: BTreeSet<String>) -> TriageResult<Assistance> {
        let features = vectorize::feature_vector(&symptoms, self.classifier.vocabulary());

        let probabilities = self
            .classifier
            .predict_proba(&features)
            .map_err(TriageError::Classify)?;

        let top_predictions = rank::top_predictions(
            &probabilities,
            self.classifier.classes(),
            &self.kb.medications,
        );

        let follow_up_questions =
            followup::follow_up_symptoms(&top_predictions, &symptoms, &self.kb.profiles);

        let similar_disease_groups = top_predictions
            .iter()
            .map(|prediction| {
                (
                    prediction.disease.clone(),
                    similarity::similar_diseases(&prediction.disease, &self.kb.profiles),
                )
            })
            .collect();

        Ok(Assistance {
            input_symptoms: symptoms.into_iter().collect(),
            top_predictions,
            follow_up_questions,
            similar_disease_groups,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use lifeguard_kb::{DiseaseProfiles, MedicationsTable, SynonymTable};
    use lifeguard_model::TrainingCase;

    use super::*;

    fn sample_profiles() -> Vec<(&'static str, Vec<&'static str>)> {
        vec![
            (
                "Tuberculosis",
                vec!["fever", "night sweats", "weight loss", "persistent cough", "fatigue"],
            ),
            (
                "Pneumonia",
                vec!["fever", "chest pain", "difficulty breathing", "productive cough"],
            ),
            (
                "COVID-19",
                vec!["fever", "dry cough", "loss of taste", "loss of smell", "fatigue"],
            ),
            (
                "Influenza",
                vec!["fever", "body aches", "chills", "sore throat", "headache"],
            ),
        ]
    }

    fn sample_kb() -> KnowledgeBase {
        let profiles = DiseaseProfiles::from_map(
            sample_profiles()
                .into_iter()
                .map(|(disease, symptoms)| {
                    (
                        disease.to_string(),
                        symptoms.into_iter().map(str::to_string).collect(),
                    )
                })
                .collect(),
        );

        let medications = MedicationsTable::from_entries([
            (
                "COVID-19".to_string(),
                vec!["Paracetamol".to_string(), "Remdesivir".to_string()],
            ),
            (
                "Influenza".to_string(),
                vec!["Oseltamivir".to_string()],
            ),
        ])
        .expect("no duplicates");

        let synonyms = SynonymTable::from_pairs([
            ("high temperature".to_string(), "fever".to_string()),
            ("tired".to_string(), "fatigue".to_string()),
        ]);

        KnowledgeBase {
            medications,
            profiles,
            synonyms,
        }
    }

    /// Train on each disease's full profile plus leave-one-out variants.
    fn sample_classifier() -> Classifier {
        let mut cases = Vec::new();
        for (disease, symptoms) in sample_profiles() {
            cases.push(TrainingCase {
                disease: disease.to_string(),
                symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
            });
            for skip in 0..symptoms.len() {
                cases.push(TrainingCase {
                    disease: disease.to_string(),
                    symptoms: symptoms
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| *i != skip)
                        .map(|(_, s)| s.to_string())
                        .collect(),
                });
            }
        }
        lifeguard_model::fit(&cases).expect("fit sample classifier")
    }

    fn sample_service() -> TriageService {
        TriageService::new(sample_classifier(), sample_kb())
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn assist_without_input_is_invalid() {
        let service = sample_service();

        let err = service.assist(None, None).expect_err("should reject");
        assert!(matches!(err, TriageError::InvalidInput(msg) if msg == "no valid symptoms detected"));

        let err = service
            .assist(Some(&[]), Some("zzz qqq"))
            .expect_err("should reject unmatchable text");
        assert!(err.is_invalid_input());
    }

    #[test]
    fn covid_symptoms_rank_covid_first_with_medications() {
        let service = sample_service();

        let result = service
            .assist(Some(&strings(&["fever", "dry cough", "loss of taste"])), None)
            .expect("assist");

        assert!(result.top_predictions.len() <= 3);
        assert_eq!(result.top_predictions[0].disease, "COVID-19");
        assert_eq!(
            result.top_predictions[0].medications,
            ["Paracetamol", "Remdesivir"]
        );
        assert!(result
            .top_predictions
            .windows(2)
            .all(|w| w[0].confidence >= w[1].confidence));
        assert!(result
            .top_predictions
            .iter()
            .all(|p| (0.0..=1.0).contains(&p.confidence)));
    }

    #[test]
    fn synonyms_contribute_independently_of_fuzzy_scores() {
        let service = sample_service();

        let result = service
            .assist(None, Some("I feel tired and have a high temperature"))
            .expect("assist");

        assert!(result.input_symptoms.contains(&"fatigue".to_string()));
        assert!(result.input_symptoms.contains(&"fever".to_string()));
    }

    #[test]
    fn follow_ups_exclude_reported_symptoms() {
        let service = sample_service();
        let reported = strings(&["fever", "dry cough"]);

        let result = service.assist(Some(&reported), None).expect("assist");
        for symptom in &reported {
            assert!(!result.follow_up_questions.contains(symptom));
        }
        assert!(!result.follow_up_questions.is_empty());
    }

    #[test]
    fn similar_groups_cover_each_top_prediction() {
        let service = sample_service();

        let result = service
            .assist(Some(&strings(&["fever", "chills"])), None)
            .expect("assist");

        assert_eq!(
            result.similar_disease_groups.len(),
            result.top_predictions.len()
        );
        for prediction in &result.top_predictions {
            let group = &result.similar_disease_groups[&prediction.disease];
            assert!(!group.contains(&prediction.disease));
        }
    }

    #[test]
    fn recalibrate_merges_only_confirmed_answers() {
        let service = sample_service();
        let initial = strings(&["fever"]);
        let answers: BTreeMap<String, bool> = [
            ("dry cough".to_string(), true),
            ("chills".to_string(), false),
        ]
        .into();

        let result = service.recalibrate(&initial, &answers).expect("recalibrate");

        assert!(result.input_symptoms.contains(&"fever".to_string()));
        assert!(result.input_symptoms.contains(&"dry cough".to_string()));
        assert!(!result.input_symptoms.contains(&"chills".to_string()));
    }

    #[test]
    fn recalibrate_never_removes_initial_symptoms() {
        let service = sample_service();
        let initial = strings(&["fever", "chills"]);
        let answers: BTreeMap<String, bool> = [
            ("fever".to_string(), false),
            ("chills".to_string(), false),
        ]
        .into();

        let result = service.recalibrate(&initial, &answers).expect("recalibrate");
        for symptom in &initial {
            assert!(result.input_symptoms.contains(symptom));
        }
    }

    #[test]
    fn recalibrate_matches_assist_on_the_merged_set() {
        let service = sample_service();
        let answers: BTreeMap<String, bool> = [("dry cough".to_string(), true)].into();

        let recalibrated = service
            .recalibrate(&strings(&["fever"]), &answers)
            .expect("recalibrate");
        let direct = service
            .assist(Some(&strings(&["fever", "dry cough"])), None)
            .expect("assist");

        assert_eq!(recalibrated, direct);
    }

    #[test]
    fn from_config_loads_artifact_and_kb() {
        let dir = tempfile::tempdir().expect("tempdir");
        let model_path = dir.path().join("model.json");
        sample_classifier().save(&model_path).expect("save artifact");

        let kb_dir = dir.path().join("kb");
        std::fs::create_dir(&kb_dir).expect("create kb dir");
        std::fs::write(
            kb_dir.join(lifeguard_kb::MEDICATIONS_FILENAME),
            "- disease: COVID-19\n  medications:\n    - Paracetamol\n",
        )
        .expect("write medications");
        std::fs::write(
            kb_dir.join(lifeguard_kb::DISEASE_SYMPTOMS_FILENAME),
            "COVID-19:\n  - fever\n  - dry cough\n",
        )
        .expect("write profiles");
        std::fs::write(
            kb_dir.join(lifeguard_kb::SYNONYMS_FILENAME),
            "high temperature: fever\n",
        )
        .expect("write synonyms");

        let cfg = CoreConfig::new(model_path, kb_dir).expect("config");
        let service = TriageService::from_config(&cfg).expect("load service");
        assert_eq!(service.classifier().classes().len(), 4);
    }

    #[test]
    fn corrupt_artifact_fails_startup() {
        let dir = tempfile::tempdir().expect("tempdir");
        let model_path = dir.path().join("model.json");
        std::fs::write(&model_path, "{\"classes\": []}").expect("write bad artifact");

        let kb_dir = dir.path().join("kb");
        std::fs::create_dir(&kb_dir).expect("create kb dir");
        std::fs::write(kb_dir.join(lifeguard_kb::MEDICATIONS_FILENAME), "[]")
            .expect("write medications");

        let cfg = CoreConfig::new(model_path, kb_dir).expect("config");
        let err = TriageService::from_config(&cfg).expect_err("should reject artifact");
        assert!(matches!(err, TriageError::ModelLoad(_)));
    }
}
