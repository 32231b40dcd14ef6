// List Scripts Use Case

use crate::error::Result;
use crate::port::{ScriptStore, StoreError};
use tracing::{debug, warn};

/// Execute list use case
///
/// A transient store condition yields an empty listing rather than a fault;
/// permission and configuration problems are surfaced.
pub async fn execute(store: &dyn ScriptStore) -> Result<Vec<String>> {
    match store.list().await {
        Ok(scripts) => {
            let names: Vec<String> = scripts.into_iter().map(|s| s.name.into()).collect();
            debug!(count = names.len(), "Listed scripts");
            Ok(names)
        }
        Err(StoreError::Unavailable(reason)) => {
            warn!(reason = %reason, "Script store unavailable, reporting empty listing");
            Ok(Vec::new())
        }
        Err(e) => {
            warn!(error = %e, "Failed to list scripts");
            Err(e.into())
        }
    }
}
