//! SDK Request/Response Types
//!
//! Mirrors the wire types of the api-http crate.

use serde::{Deserialize, Serialize};

pub use relay_core::domain::ExecutionResult;

/// Request to run a script
#[derive(Debug, Clone, Serialize)]
pub struct RunScriptRequest {
    pub script_name: String,
}

/// Response from list operation
#[derive(Debug, Clone, Deserialize)]
pub struct ListScriptsResponse {
    pub scripts: Vec<String>,
}

/// Body of every non-2xx response
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Response from health check
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
