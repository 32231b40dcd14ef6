// Execution Endpoint Port (client side)
// How the selection protocol reaches a remote host

use crate::domain::{ExecutionResult, Host};
use async_trait::async_trait;
use thiserror::Error;

/// Anything that went wrong between the protocol and a remote endpoint.
///
/// The selection protocol reacts to every variant the same way; the
/// distinction exists for logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Endpoint returned {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    Decode(String),
}

/// Remote execution endpoint
///
/// Implementations:
/// - HttpExecutionEndpoint (relay-sdk): HTTP/JSON against `Host::base_url`
/// - MockExecutionEndpoint: scripted responses, for tests
#[async_trait]
pub trait ExecutionEndpoint: Send + Sync {
    /// `GET /list_scripts` on `host`
    async fn list_scripts(&self, host: &Host) -> Result<Vec<String>, TransportError>;

    /// `POST /run_script` on `host`
    async fn run_script(
        &self,
        host: &Host,
        script_name: &str,
    ) -> Result<ExecutionResult, TransportError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Endpoint answering from per-host tables
    #[derive(Default)]
    pub struct MockExecutionEndpoint {
        listings: Mutex<HashMap<String, Result<Vec<String>, TransportError>>>,
        runs: Mutex<HashMap<(String, String), Result<ExecutionResult, TransportError>>>,
        run_calls: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl MockExecutionEndpoint {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_listing(self, host: &str, scripts: &[&str]) -> Self {
            self.listings.lock().unwrap().insert(
                host.to_string(),
                Ok(scripts.iter().map(|s| s.to_string()).collect()),
            );
            self
        }

        pub fn with_listing_error(self, host: &str, error: TransportError) -> Self {
            self.listings
                .lock()
                .unwrap()
                .insert(host.to_string(), Err(error));
            self
        }

        pub fn with_run(
            self,
            host: &str,
            script: &str,
            outcome: Result<ExecutionResult, TransportError>,
        ) -> Self {
            self.runs
                .lock()
                .unwrap()
                .insert((host.to_string(), script.to_string()), outcome);
            self
        }

        /// (host, script) pairs passed to `run_script`, in call order
        pub fn run_calls(&self) -> Vec<(String, String)> {
            self.run_calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ExecutionEndpoint for MockExecutionEndpoint {
        async fn list_scripts(&self, host: &Host) -> Result<Vec<String>, TransportError> {
            self.listings
                .lock()
                .unwrap()
                .get(&host.name)
                .cloned()
                .unwrap_or_else(|| Err(TransportError::Transport("connection refused".into())))
        }

        async fn run_script(
            &self,
            host: &Host,
            script_name: &str,
        ) -> Result<ExecutionResult, TransportError> {
            let key = (host.name.clone(), script_name.to_string());
            self.run_calls.lock().unwrap().push(key.clone());
            self.runs
                .lock()
                .unwrap()
                .get(&key)
                .cloned()
                .unwrap_or_else(|| {
                    Err(TransportError::Status {
                        status: 404,
                        detail: format!("Script {} not found", script_name),
                    })
                })
        }
    }
}
