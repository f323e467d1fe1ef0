//! Bernoulli naive Bayes classifier and its JSON artifact form.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ModelError, ModelResult};

/// A fitted multi-class Bernoulli naive Bayes classifier.
///
/// The struct is also the artifact wire model: `classes`, `vocabulary` and
/// the fitted parameters serialise to JSON as one document. Invariants
/// between the fields (matching lengths, probabilities strictly inside
/// `(0, 1)` thanks to Laplace smoothing) are checked on every load, so a
/// hand-edited or truncated artifact is rejected at startup instead of
/// producing garbage scores at request time.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Classifier {
    classes: Vec<String>,
    vocabulary: Vec<String>,
    class_priors: Vec<f64>,
    feature_probs: Vec<Vec<f64>>,
}

impl Classifier {
    /// Assemble a classifier from fitted parameters, validating shape.
    ///
    /// `feature_probs[c][f]` is the smoothed probability that feature `f` is
    /// present given class `c`.
    pub fn new(
        classes: Vec<String>,
        vocabulary: Vec<String>,
        class_priors: Vec<f64>,
        feature_probs: Vec<Vec<f64>>,
    ) -> ModelResult<Self> {
        let classifier = Self {
            classes,
            vocabulary,
            class_priors,
            feature_probs,
        };
        classifier.validate()?;
        Ok(classifier)
    }

    /// Ordered class labels; `predict_proba` output aligns with this order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Ordered symptom vocabulary the model was trained on.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Probability distribution over classes for one binary feature vector.
    ///
    /// Scores are computed in log space and normalised with log-sum-exp, so
    /// the returned probabilities are finite and sum to ~1.0 across all
    /// classes.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ShapeMismatch`] if `features` does not have one
    /// entry per vocabulary symptom.
    pub fn predict_proba(&self, features: &[u8]) -> ModelResult<Vec<f64>> {
        if features.len() != self.vocabulary.len() {
            return Err(ModelError::ShapeMismatch {
                expected: self.vocabulary.len(),
                got: features.len(),
            });
        }

        let mut log_scores = Vec::with_capacity(self.classes.len());
        for (prior, probs) in self.class_priors.iter().zip(&self.feature_probs) {
            let mut score = prior.ln();
            for (p, &present) in probs.iter().zip(features) {
                score += if present != 0 { p.ln() } else { (1.0 - p).ln() };
            }
            log_scores.push(score);
        }

        let max = log_scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mut probabilities: Vec<f64> = log_scores.iter().map(|s| (s - max).exp()).collect();
        let total: f64 = probabilities.iter().sum();
        for p in &mut probabilities {
            *p /= total;
        }

        Ok(probabilities)
    }

    /// Parse an artifact from JSON text, validating invariants.
    pub fn from_json(json_text: &str) -> ModelResult<Self> {
        let classifier: Self = serde_json::from_str(json_text)?;
        classifier.validate()?;
        Ok(classifier)
    }

    /// Render the artifact as JSON text.
    pub fn to_json(&self) -> ModelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load an artifact from `path`.
    pub fn load(path: &Path) -> ModelResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::ArtifactRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Write the artifact to `path`.
    pub fn save(&self, path: &Path) -> ModelResult<()> {
        let text = self.to_json()?;
        std::fs::write(path, text).map_err(|source| ModelError::ArtifactWrite {
            path: path.to_path_buf(),
            source,
        })
    }

    fn validate(&self) -> ModelResult<()> {
        if self.classes.is_empty() {
            return Err(ModelError::MalformedArtifact(
                "artifact has no classes".into(),
            ));
        }

        if self.class_priors.len() != self.classes.len() {
            return Err(ModelError::MalformedArtifact(format!(
                "{} class priors for {} classes",
                self.class_priors.len(),
                self.classes.len()
            )));
        }

        if self.feature_probs.len() != self.classes.len() {
            return Err(ModelError::MalformedArtifact(format!(
                "{} feature rows for {} classes",
                self.feature_probs.len(),
                self.classes.len()
            )));
        }

        for (class, row) in self.classes.iter().zip(&self.feature_probs) {
            if row.len() != self.vocabulary.len() {
                return Err(ModelError::MalformedArtifact(format!(
                    "feature row for '{class}' has {} entries for {} vocabulary symptoms",
                    row.len(),
                    self.vocabulary.len()
                )));
            }
            if row.iter().any(|p| !p.is_finite() || *p <= 0.0 || *p >= 1.0) {
                return Err(ModelError::MalformedArtifact(format!(
                    "feature probabilities for '{class}' must lie strictly between 0 and 1"
                )));
            }
        }

        if self
            .class_priors
            .iter()
            .any(|p| !p.is_finite() || *p <= 0.0 || *p > 1.0)
        {
            return Err(ModelError::MalformedArtifact(
                "class priors must lie in (0, 1]".into(),
            ));
        }

        Ok(())
    }
}
