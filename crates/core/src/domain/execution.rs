// Execution Domain Model

use serde::{Deserialize, Serialize};

/// One invocation request: run the named script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    pub script_name: String,
}

impl ExecutionRequest {
    pub fn new(script_name: impl Into<String>) -> Self {
        Self {
            script_name: script_name.into(),
        }
    }
}

/// Captured outcome of one script run.
///
/// Field names match the wire format of `POST /run_script`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub output: String,
    pub error: String,
    pub return_code: i32,
}

impl ExecutionResult {
    /// Build a result from raw stream bytes, replacing invalid UTF-8
    pub fn from_raw(stdout: &[u8], stderr: &[u8], return_code: i32) -> Self {
        Self {
            output: String::from_utf8_lossy(stdout).into_owned(),
            error: String::from_utf8_lossy(stderr).into_owned(),
            return_code,
        }
    }

    /// Exit code 0 by convention
    pub fn is_success(&self) -> bool {
        self.return_code == 0
    }

    pub fn is_silent(&self) -> bool {
        self.output.is_empty() && self.error.is_empty()
    }
}
