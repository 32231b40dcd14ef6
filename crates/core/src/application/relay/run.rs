// Run Script Use Case

use crate::domain::{ExecutionRequest, ExecutionResult};
use crate::error::Result;
use crate::port::{ScriptExecutor, ScriptStore};
use tracing::{info, warn};

/// Execute run use case: resolve, then hand the script to the executor.
///
/// The executor is only reached with a script the store resolved.
pub async fn execute(
    store: &dyn ScriptStore,
    executor: &dyn ScriptExecutor,
    req: ExecutionRequest,
) -> Result<ExecutionResult> {
    let script = store.resolve(&req.script_name).await.map_err(|e| {
        info!(script = %req.script_name, error = %e, "Script resolution failed");
        e
    })?;

    let result = executor.execute(&script).await.map_err(|e| {
        warn!(script = %script.name, error = %e, "Script execution failed");
        e
    })?;

    info!(
        script = %script.name,
        return_code = result.return_code,
        "Script finished"
    );

    Ok(result)
}
