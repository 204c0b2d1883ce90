//! HTTP surface: `GET /` health, `POST /process`, `DELETE /sessions`.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};
use validator::Validate;

use crate::actors::supervisor::SupervisorHandle;
use crate::error::AppError;
use crate::models::{ClearResponse, HealthResponse, ProcessRequest, ProcessResponse};

pub const SERVICE_NAME: &str = "Mavilda Bot - Seragro";

const ENDPOINTS: [&str; 3] = ["GET /", "POST /process", "DELETE /sessions"];

pub struct AppState {
    pub supervisor: SupervisorHandle,
}

pub fn router(supervisor: SupervisorHandle) -> Router {
    let state = Arc::new(AppState { supervisor });
    Router::new()
        .route("/", get(health))
        .route("/process", post(process))
        .route("/sessions", delete(clear_sessions))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>, AppError> {
    let sessions = state.supervisor.session_count().await?;
    Ok(Json(HealthResponse {
        status: "OK".to_string(),
        name: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: ENDPOINTS.iter().map(|e| e.to_string()).collect(),
        sessions,
        timestamp: chrono::Utc::now(),
    }))
}

#[instrument(skip_all)]
async fn process(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ProcessRequest>, JsonRejection>,
) -> Result<Json<ProcessResponse>, AppError> {
    // Malformed bodies get the same 400 as missing fields.
    let Json(request) = body.map_err(|e| AppError::Validation(e.body_text()))?;
    request.validate()?;

    let outcome = state
        .supervisor
        .process_message(request.session_id, request.message)
        .await?;
    Ok(Json(ProcessResponse::from(outcome)))
}

async fn clear_sessions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ClearResponse>, AppError> {
    let cleared = state.supervisor.clear_sessions().await?;
    info!(cleared, "Session table cleared over HTTP");
    Ok(Json(ClearResponse { cleared }))
}
