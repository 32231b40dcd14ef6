//! Script Relay SDK - Rust Client Library
//!
//! Provides a client for the script execution endpoint, plus an
//! `ExecutionEndpoint` adapter so the selection protocol can talk to real hosts.
//!
//! # Example
//!
//! ```no_run
//! use relay_sdk::RelayClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RelayClient::connect("http://127.0.0.1:8000")?;
//!
//!     let scripts = client.list_scripts().await?;
//!     if let Some(first) = scripts.first() {
//!         let result = client.run_script(first.as_str()).await?;
//!         println!("{} exited with {}", first, result.return_code);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod endpoint;
mod error;
mod types;

pub use client::{RelayClient, DEFAULT_REQUEST_TIMEOUT};
pub use endpoint::HttpExecutionEndpoint;
pub use error::{Result, SdkError};
pub use types::{
    ErrorResponse, ExecutionResult, HealthResponse, ListScriptsResponse, RunScriptRequest,
};
