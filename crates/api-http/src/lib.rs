//! HTTP API Layer
//!
//! Exposes the execution endpoint: `GET /list_scripts`, `POST /run_script`
//! and `GET /health`.

pub mod error;
pub mod handler;
pub mod server;
pub mod types;

pub use server::{build_router, HttpServer, HttpServerConfig, HttpServerHandle};
