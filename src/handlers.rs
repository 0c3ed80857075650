use crate::errors::AppError;
use crate::models::{HealthResponse, LeadsResponse, ScoredLead};
use crate::services::LeadScoringService;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Scoring pipeline, owning the lead store.
    pub scoring: LeadScoringService,
}

/// Health check endpoint.
///
/// Returns 200 with a fixed liveness message.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Lead Scoring API is running".to_string(),
    })
}

/// POST /api/score
///
/// Validates and scores a lead submission, stores the result and returns it.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `payload` - JSON body with the lead intake fields.
///
/// # Returns
///
/// * `Result<Json<ScoredLead>, AppError>` - The scored lead or an error.
pub async fn score_lead(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ScoredLead>, AppError> {
    tracing::info!("POST /api/score");

    let Json(body) = payload.map_err(|rejection| {
        tracing::warn!("Rejected unreadable lead body: {}", rejection.body_text());
        AppError::BadRequest(rejection.body_text())
    })?;

    let lead = state.scoring.score(&body).await?;

    Ok(Json(lead))
}

/// GET /api/leads
///
/// Lists every lead scored since the process started, oldest first.
pub async fn list_leads(State(state): State<Arc<AppState>>) -> Json<LeadsResponse> {
    let leads = state.scoring.leads();
    tracing::info!("GET /api/leads - {} lead(s)", leads.len());

    Json(LeadsResponse { leads })
}
