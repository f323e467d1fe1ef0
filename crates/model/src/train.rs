//! Offline training for the naive Bayes classifier.
//!
//! Training is a one-shot batch job run from the CLI, never from the request
//! path. The dataset is a YAML list of labelled cases; the symptom vocabulary
//! is the sorted union of every symptom that appears, and the fitted
//! parameters use Laplace smoothing so no probability is ever exactly 0 or 1.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Classifier, ModelError, ModelResult};

/// One labelled training case: a disease and the symptoms observed with it.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TrainingCase {
    pub disease: String,

    #[serde(default)]
    pub symptoms: Vec<String>,
}

/// Fit a classifier from labelled cases.
///
/// Class labels and the vocabulary are both sorted, so retraining on a
/// reordered copy of the same dataset produces an identical artifact.
///
/// # Errors
///
/// Returns [`ModelError::EmptyDataset`] when `cases` is empty and
/// [`ModelError::InvalidDataset`] when a case carries an empty disease label.
pub fn fit(cases: &[TrainingCase]) -> ModelResult<Classifier> {
    if cases.is_empty() {
        return Err(ModelError::EmptyDataset);
    }

    let mut class_set = BTreeSet::new();
    let mut vocab_set = BTreeSet::new();
    for (index, case) in cases.iter().enumerate() {
        if case.disease.trim().is_empty() {
            return Err(ModelError::InvalidDataset(format!(
                "case {index} has an empty disease label"
            )));
        }
        class_set.insert(case.disease.as_str());
        vocab_set.extend(case.symptoms.iter().map(String::as_str));
    }

    let classes: Vec<String> = class_set.iter().map(|c| c.to_string()).collect();
    let vocabulary: Vec<String> = vocab_set.iter().map(|s| s.to_string()).collect();

    let class_index: HashMap<&str, usize> = classes
        .iter()
        .enumerate()
        .map(|(i, c)| (c.as_str(), i))
        .collect();
    let vocab_index: HashMap<&str, usize> = vocabulary
        .iter()
        .enumerate()
        .map(|(i, s)| (s.as_str(), i))
        .collect();

    let mut class_counts = vec![0usize; classes.len()];
    let mut feature_counts = vec![vec![0usize; vocabulary.len()]; classes.len()];

    for case in cases {
        let ci = class_index[case.disease.as_str()];
        class_counts[ci] += 1;

        // Repeated symptoms within one case count once.
        let present: BTreeSet<&str> = case.symptoms.iter().map(String::as_str).collect();
        for symptom in present {
            feature_counts[ci][vocab_index[symptom]] += 1;
        }
    }

    let total = cases.len() as f64;
    let class_priors: Vec<f64> = class_counts.iter().map(|&c| c as f64 / total).collect();

    let feature_probs: Vec<Vec<f64>> = class_counts
        .iter()
        .zip(&feature_counts)
        .map(|(&class_count, counts)| {
            counts
                .iter()
                .map(|&count| (count as f64 + 1.0) / (class_count as f64 + 2.0))
                .collect()
        })
        .collect();

    Classifier::new(classes, vocabulary, class_priors, feature_probs)
}

/// Load a training dataset from a YAML file.
pub fn load_dataset(path: &Path) -> ModelResult<Vec<TrainingCase>> {
    let text = std::fs::read_to_string(path).map_err(|source| ModelError::DatasetRead {
        path: path.to_path_buf(),
        source,
    })?;

    let deserializer = serde_yaml::Deserializer::from_str(&text);
    serde_path_to_error::deserialize(deserializer).map_err(|err| {
        let field = err.path().to_string();
        let field = if field.is_empty() {
            "<root>".to_string()
        } else {
            field
        };
        ModelError::DatasetParse {
            field,
            source: err.into_inner(),
        }
    })
}
