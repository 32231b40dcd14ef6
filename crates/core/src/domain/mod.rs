// Domain Layer - Pure business logic and entities

pub mod error;
pub mod execution;
pub mod host;
pub mod script;
pub mod session;

// Re-exports
pub use error::DomainError;
pub use execution::{ExecutionRequest, ExecutionResult};
pub use host::Host;
pub use script::{ScriptName, ScriptRef, SCRIPT_EXTENSION};
pub use session::{CallerId, Phase, SelectionSession};
