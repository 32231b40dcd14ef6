// Script Store Port
// Capability-typed registry of the scripts a host can run

use crate::domain::{DomainError, ScriptName, ScriptRef};
use async_trait::async_trait;
use thiserror::Error;

/// Script store errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error(transparent)]
    InvalidName(#[from] DomainError),

    #[error("Script {0} not found")]
    NotFound(String),

    /// Transient read condition; callers may treat the store as empty
    #[error("Script store temporarily unavailable: {0}")]
    Unavailable(String),

    /// Permission or configuration problem with the store root
    #[error("Script store error: {0}")]
    Io(String),
}

/// Script Store trait
///
/// Implementations:
/// - FsScriptStore: scripts are files directly inside a root directory
/// - InMemoryScriptStore: fixed set, for tests
#[async_trait]
pub trait ScriptStore: Send + Sync {
    /// Enumerate runnable scripts, sorted by name
    ///
    /// # Errors
    /// - StoreError::Unavailable on a transient read condition
    /// - StoreError::Io if the root is missing or unreadable
    async fn list(&self) -> Result<Vec<ScriptRef>, StoreError>;

    /// Resolve a caller-supplied name to a script inside the store
    ///
    /// # Errors
    /// - StoreError::InvalidName if the name could escape the store root
    /// - StoreError::NotFound if no such script exists
    async fn resolve(&self, name: &str) -> Result<ScriptRef, StoreError>;
}

/// Validate a raw name before touching the store
pub fn parse_name(name: &str) -> Result<ScriptName, StoreError> {
    Ok(ScriptName::parse(name)?)
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Fixed in-memory store
    pub struct InMemoryScriptStore {
        scripts: Vec<ScriptRef>,
        list_failure: Option<StoreError>,
        resolve_count: Arc<Mutex<usize>>,
    }

    impl InMemoryScriptStore {
        pub fn new(names: &[&str]) -> Self {
            let scripts = names
                .iter()
                .map(|n| {
                    let name = ScriptName::parse(*n).expect("valid test script name");
                    ScriptRef::new(name, format!("/scripts/{}", n))
                })
                .collect();
            Self {
                scripts,
                list_failure: None,
                resolve_count: Arc::new(Mutex::new(0)),
            }
        }

        /// Make every `list` call fail with `error`
        pub fn failing_list(mut self, error: StoreError) -> Self {
            self.list_failure = Some(error);
            self
        }

        pub fn resolve_count(&self) -> usize {
            *self.resolve_count.lock().unwrap()
        }
    }

    #[async_trait]
    impl ScriptStore for InMemoryScriptStore {
        async fn list(&self) -> Result<Vec<ScriptRef>, StoreError> {
            match &self.list_failure {
                Some(err) => Err(err.clone()),
                None => Ok(self.scripts.clone()),
            }
        }

        async fn resolve(&self, name: &str) -> Result<ScriptRef, StoreError> {
            *self.resolve_count.lock().unwrap() += 1;
            let name = parse_name(name)?;
            self.scripts
                .iter()
                .find(|s| s.name == name)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(name.to_string()))
        }
    }
}
