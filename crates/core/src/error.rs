// Central Error Type for the Application

use crate::port::{ExecutionError, StoreError};
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("Invalid script name: {0}")]
    InvalidName(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Script store error: {0}")]
    Store(String),

    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidName(e) => AppError::InvalidName(e.to_string()),
            StoreError::NotFound(name) => AppError::NotFound(format!("Script {} not found", name)),
            StoreError::Unavailable(msg) | StoreError::Io(msg) => AppError::Store(msg),
        }
    }
}
