//! HTTP Method Handlers
//!
//! Thin adapters from the wire types to `RelayService`.

use crate::error::ApiError;
use crate::types::{HealthResponse, ListScriptsResponse, RunScriptRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use relay_core::application::RelayService;
use relay_core::domain::{ExecutionRequest, ExecutionResult};
use std::sync::Arc;

/// GET /list_scripts
pub async fn list_scripts(
    State(service): State<Arc<RelayService>>,
) -> Result<Json<ListScriptsResponse>, ApiError> {
    let scripts = service.list_scripts().await?;
    Ok(Json(ListScriptsResponse { scripts }))
}

/// POST /run_script
pub async fn run_script(
    State(service): State<Arc<RelayService>>,
    payload: Result<Json<RunScriptRequest>, JsonRejection>,
) -> Result<Json<ExecutionResult>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;

    let result = service
        .run_script(ExecutionRequest::new(req.script_name))
        .await?;

    Ok(Json(result))
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: relay_core::VERSION,
    })
}
