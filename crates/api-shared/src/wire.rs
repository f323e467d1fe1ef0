//! Wire models for the REST API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for the assist endpoint.
///
/// At least one of `symptoms`/`text` must yield a symptom after
/// normalization; otherwise the request is rejected as invalid input.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
pub struct AssistReq {
    /// Explicit symptom names, taken verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<Vec<String>>,

    /// Free-text symptom description, parsed by fuzzy matching and the
    /// synonym table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Request body for the recalibrate endpoint.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
pub struct RecalibrateReq {
    /// The symptom set from the original assist call.
    pub initial_symptoms: Vec<String>,

    /// Follow-up symptom name to yes/no answer. Only `true` answers are
    /// merged; `false` never removes a symptom.
    pub follow_up_answers: BTreeMap<String, bool>,
}

/// One ranked disease candidate.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
pub struct PredictionRes {
    pub disease: String,

    /// Classifier probability in `[0, 1]`.
    pub confidence: f64,

    /// Medication names for the disease; empty when none are known.
    pub medications: Vec<String>,
}

/// Response body shared by the assist and recalibrate endpoints.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
pub struct AssistRes {
    /// The deduplicated symptom set that was scored.
    pub input_symptoms: Vec<String>,

    /// Up to three candidates, sorted by descending confidence.
    pub top_predictions: Vec<PredictionRes>,

    /// Symptoms worth asking about to refine the prediction.
    pub follow_up_questions: Vec<String>,

    /// For each top prediction, other diseases with overlapping symptom
    /// profiles.
    pub similar_disease_groups: BTreeMap<String, Vec<String>>,
}

/// Health check response.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}
