//! # API REST
//!
//! REST API implementation for Lifeguard.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status mapping)
//!
//! Uses `api-shared` for wire types and `lifeguard-core` for the pipeline.

#![warn(rust_2018_idioms)]

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{AssistReq, AssistRes, HealthRes, HealthService, PredictionRes, RecalibrateReq};
use lifeguard_core::{Assistance, TriageError, TriageService};

/// Application state shared across REST API handlers.
///
/// Holds the triage service behind an `Arc`: all state is read-only after
/// startup, so handlers share it without coordination.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TriageService>,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, assist, recalibrate),
    components(schemas(
        HealthRes,
        AssistReq,
        AssistRes,
        PredictionRes,
        RecalibrateReq,
    ))
)]
struct ApiDoc;

/// Build the REST router with all routes, API docs and CORS.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/assist", post(assist))
        .route("/v1/recalibrate", post(recalibrate))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API.
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/v1/assist",
    request_body = AssistReq,
    responses(
        (status = 200, description = "Ranked predictions with follow-ups", body = AssistRes),
        (status = 400, description = "No valid symptoms detected"),
        (status = 500, description = "Internal server error")
    )
)]
/// Rank candidate diseases for a set of symptoms.
///
/// Accepts explicit symptom names and/or a free-text description; at least
/// one of the two must yield a symptom.
///
/// # Errors
/// Returns `400 Bad Request` when normalization produces no symptoms, and
/// `500 Internal Server Error` with the failure description when scoring
/// fails.
#[axum::debug_handler]
async fn assist(
    State(state): State<AppState>,
    Json(req): Json<AssistReq>,
) -> Result<Json<AssistRes>, (StatusCode, String)> {
    state
        .service
        .assist(req.symptoms.as_deref(), req.text.as_deref())
        .map(|assistance| Json(to_wire(assistance)))
        .map_err(into_response_error)
}

#[utoipa::path(
    post,
    path = "/v1/recalibrate",
    request_body = RecalibrateReq,
    responses(
        (status = 200, description = "Re-ranked predictions after follow-up answers", body = AssistRes),
        (status = 500, description = "Internal server error")
    )
)]
/// Re-rank after the caller answers follow-up questions.
///
/// Confirmed follow-ups merge into the initial symptom set before re-scoring;
/// declined ones are ignored.
#[axum::debug_handler]
async fn recalibrate(
    State(state): State<AppState>,
    Json(req): Json<RecalibrateReq>,
) -> Result<Json<AssistRes>, (StatusCode, String)> {
    state
        .service
        .recalibrate(&req.initial_symptoms, &req.follow_up_answers)
        .map(|assistance| Json(to_wire(assistance)))
        .map_err(into_response_error)
}

fn into_response_error(err: TriageError) -> (StatusCode, String) {
    if err.is_invalid_input() {
        (StatusCode::BAD_REQUEST, err.to_string())
    } else {
        tracing::error!("triage error: {err}");
        (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }
}

fn to_wire(assistance: Assistance) -> AssistRes {
    AssistRes {
        input_symptoms: assistance.input_symptoms,
        top_predictions: assistance
            .top_predictions
            .into_iter()
            .map(|p| PredictionRes {
                disease: p.disease,
                confidence: p.confidence,
                medications: p.medications,
            })
            .collect(),
        follow_up_questions: assistance.follow_up_questions,
        similar_disease_groups: assistance.similar_disease_groups,
    }
}
