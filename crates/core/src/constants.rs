//! Constants used throughout the Lifeguard core crate.

/// Fuzzy-match score (0-100 scale) a token must strictly exceed to be
/// accepted as a vocabulary symptom.
pub const FUZZY_ACCEPT_SCORE: f64 = 80.0;

/// Number of top-ranked disease predictions returned per request.
pub const TOP_K: usize = 3;

/// Jaccard similarity at or above which two diseases are grouped together.
pub const SIMILARITY_THRESHOLD: f64 = 0.15;

/// Directory name searched for knowledge-base files when no override is given.
pub const KB_DIR_NAME: &str = "kb";

/// Default filename for the model artifact.
pub const DEFAULT_MODEL_FILENAME: &str = "model.json";
