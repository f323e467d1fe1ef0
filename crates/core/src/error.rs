use lifeguard_kb::KbError;
use lifeguard_model::ModelError;

#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to load model artifact: {0}")]
    ModelLoad(#[source] ModelError),

    #[error("classification failed: {0}")]
    Classify(#[source] ModelError),

    #[error("failed to load knowledge base: {0}")]
    KbLoad(#[from] KbError),
}

impl TriageError {
    /// Whether this error reflects bad caller input (a 400-equivalent) as
    /// opposed to an internal failure.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, TriageError::InvalidInput(_))
    }
}

pub type TriageResult<T> = std::result::Result<T, TriageError>;
