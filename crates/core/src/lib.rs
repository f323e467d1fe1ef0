//! # Lifeguard Core
//!
//! Core triage pipeline for the Lifeguard symptom-to-disease assistant.
//!
//! This crate contains pure request-scoped computation over read-only state
//! loaded at startup:
//! - Symptom normalization (explicit lists, fuzzy free-text matching, synonym
//!   substitution)
//! - Feature vectorization against the model's trained vocabulary
//! - Classifier invocation and top-K ranking with medication lookups
//! - Follow-up symptom generation and disease similarity grouping
//!
//! **No API concerns**: HTTP servers and serialization of request/response
//! bodies belong in `api-rest` and `api-shared`.

pub mod config;
pub mod constants;
pub mod error;
pub mod followup;
pub mod normalize;
pub mod rank;
pub mod service;
pub mod similarity;
pub mod vectorize;

pub use config::{resolve_kb_dir, CoreConfig};
pub use error::{TriageError, TriageResult};
pub use rank::Prediction;
pub use service::{Assistance, TriageService};
