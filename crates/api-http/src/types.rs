//! HTTP Request/Response Types
//!
//! Wire format of the execution endpoint. `POST /run_script` answers with
//! `relay_core::domain::ExecutionResult` directly.

use serde::{Deserialize, Serialize};

/// GET /list_scripts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListScriptsResponse {
    pub scripts: Vec<String>,
}

/// POST /run_script
#[derive(Debug, Deserialize)]
pub struct RunScriptRequest {
    pub script_name: String,
}

/// Error body for every non-2xx response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
