//! # API Shared
//!
//! Types and utilities shared by the Lifeguard API surface:
//! - Wire request/response models for the REST endpoints
//! - The health service
//!
//! Keeping these out of `lifeguard-core` keeps the pipeline free of API
//! concerns, and keeping them out of `api-rest` leaves them reusable by other
//! frontends (the CLI, future transports).

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::{AssistReq, AssistRes, HealthRes, PredictionRes, RecalibrateReq};
