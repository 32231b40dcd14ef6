// Relay Service - Execution endpoint use cases

pub mod list;
pub mod run;

use crate::domain::{ExecutionRequest, ExecutionResult};
use crate::error::Result;
use crate::port::{ScriptExecutor, ScriptStore};
use std::sync::Arc;

/// Relay Service
///
/// Holds no per-call state; every call is independent.
pub struct RelayService {
    store: Arc<dyn ScriptStore>,
    executor: Arc<dyn ScriptExecutor>,
}

impl RelayService {
    pub fn new(store: Arc<dyn ScriptStore>, executor: Arc<dyn ScriptExecutor>) -> Self {
        Self { store, executor }
    }

    /// Names of the scripts this host can run
    pub async fn list_scripts(&self) -> Result<Vec<String>> {
        list::execute(self.store.as_ref()).await
    }

    /// Run a script by name
    pub async fn run_script(&self, req: ExecutionRequest) -> Result<ExecutionResult> {
        run::execute(self.store.as_ref(), self.executor.as_ref(), req).await
    }
}
