// Script Executor Port
// Abstraction for running one stored script as a child process

use crate::domain::{ExecutionResult, ScriptRef};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Execution errors
///
/// A script that runs and exits non-zero is NOT an error; it is an
/// `ExecutionResult` with that return code.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Spawn failed: {0}")]
    SpawnFailed(String),

    #[error("Execution fault: {0}")]
    ExecutionFault(String),

    #[error("Process timeout after {0}ms")]
    Timeout(u64),
}

/// Opt-in hardening knobs. The default imposes no limit at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionLimits {
    /// Wall-clock limit; the child is killed when it elapses
    pub timeout: Option<Duration>,
    /// Per-stream capture ceiling; excess bytes are drained and dropped
    pub max_output_bytes: Option<usize>,
}

impl ExecutionLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }
}

/// Script Executor trait
///
/// Implementations:
/// - SubprocessExecutor: `sh <script>` with captured stdout/stderr
/// - MockScriptExecutor: canned results, for tests
#[async_trait]
pub trait ScriptExecutor: Send + Sync {
    /// Run a resolved script to completion and return what it produced
    ///
    /// # Errors
    /// - ExecutionError::SpawnFailed if the interpreter cannot be started
    /// - ExecutionError::ExecutionFault if the streams cannot be drained
    /// - ExecutionError::Timeout if an opt-in timeout elapsed
    async fn execute(&self, script: &ScriptRef) -> Result<ExecutionResult, ExecutionError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock executor behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Return this result
        Complete(ExecutionResult),
        /// Fail to spawn with message
        SpawnFail(String),
        /// Fail while draining with message
        Fault(String),
    }

    /// Mock Script Executor for testing
    pub struct MockScriptExecutor {
        behavior: Arc<Mutex<MockBehavior>>,
        executed: Arc<Mutex<Vec<ScriptRef>>>,
    }

    impl MockScriptExecutor {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior: Arc::new(Mutex::new(behavior)),
                executed: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn new_success(output: impl Into<String>) -> Self {
            Self::new(MockBehavior::Complete(ExecutionResult {
                output: output.into(),
                error: String::new(),
                return_code: 0,
            }))
        }

        pub fn new_spawn_fail(message: impl Into<String>) -> Self {
            Self::new(MockBehavior::SpawnFail(message.into()))
        }

        pub fn call_count(&self) -> usize {
            self.executed.lock().unwrap().len()
        }

        pub fn executed(&self) -> Vec<ScriptRef> {
            self.executed.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ScriptExecutor for MockScriptExecutor {
        async fn execute(&self, script: &ScriptRef) -> Result<ExecutionResult, ExecutionError> {
            self.executed.lock().unwrap().push(script.clone());

            let behavior = self.behavior.lock().unwrap().clone();

            match behavior {
                MockBehavior::Complete(result) => Ok(result),
                MockBehavior::SpawnFail(msg) => Err(ExecutionError::SpawnFailed(msg)),
                MockBehavior::Fault(msg) => Err(ExecutionError::ExecutionFault(msg)),
            }
        }
    }
}
