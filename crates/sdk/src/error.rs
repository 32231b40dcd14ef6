//! SDK Error Types

use relay_core::port::TransportError;
use thiserror::Error;

/// SDK Result type
pub type Result<T> = std::result::Result<T, SdkError>;

/// SDK Error
#[derive(Debug, Error)]
pub enum SdkError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Endpoint error ({status}): {detail}")]
    Api { status: u16, detail: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl SdkError {
    /// Whether the endpoint reported that the script does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, SdkError::Api { status: 404, .. })
    }
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            SdkError::InvalidUrl(e.to_string())
        } else if e.is_connect() {
            SdkError::Connection(e.to_string())
        } else if e.is_decode() {
            SdkError::Decode(e.to_string())
        } else {
            SdkError::Transport(e.to_string())
        }
    }
}

impl From<SdkError> for TransportError {
    fn from(e: SdkError) -> Self {
        match e {
            SdkError::Api { status, detail } => TransportError::Status { status, detail },
            SdkError::Decode(msg) => TransportError::Decode(msg),
            other => TransportError::Transport(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_mapping() {
        let err: TransportError = SdkError::Api {
            status: 404,
            detail: "Script x.sh not found".into(),
        }
        .into();
        assert_eq!(
            err,
            TransportError::Status {
                status: 404,
                detail: "Script x.sh not found".into()
            }
        );

        let err: TransportError = SdkError::Decode("expected value".into()).into();
        assert_eq!(err, TransportError::Decode("expected value".into()));

        let err: TransportError = SdkError::Connection("refused".into()).into();
        assert!(matches!(err, TransportError::Transport(msg) if msg.contains("refused")));
    }
}
