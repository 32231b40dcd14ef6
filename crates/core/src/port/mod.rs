// Port Layer - Interfaces for external dependencies

pub mod execution_endpoint; // client side
pub mod script_executor;
pub mod script_store;
pub mod time_provider;

// Re-exports
pub use execution_endpoint::{ExecutionEndpoint, TransportError};
pub use script_executor::{ExecutionError, ExecutionLimits, ScriptExecutor};
pub use script_store::{ScriptStore, StoreError};
pub use time_provider::TimeProvider;
