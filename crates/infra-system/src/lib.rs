// Script Relay Infrastructure - System Adapters
// Implements: ScriptStore, ScriptExecutor

pub mod fs_script_store;
pub mod subprocess_executor;

pub use fs_script_store::FsScriptStore;
pub use subprocess_executor::SubprocessExecutor;
