//! `ExecutionEndpoint` adapter over HTTP

use crate::client::{build_http_client, RelayClient};
use crate::error::Result;
use async_trait::async_trait;
use relay_core::domain::{ExecutionResult, Host};
use relay_core::port::{ExecutionEndpoint, TransportError};
use std::time::Duration;

/// Reaches any configured host through one shared connection pool
pub struct HttpExecutionEndpoint {
    http: reqwest::Client,
}

impl HttpExecutionEndpoint {
    pub fn new(request_timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: build_http_client(request_timeout)?,
        })
    }

    fn client(&self, host: &Host) -> std::result::Result<RelayClient, TransportError> {
        Ok(RelayClient::with_client(self.http.clone(), &host.base_url)?)
    }
}

#[async_trait]
impl ExecutionEndpoint for HttpExecutionEndpoint {
    async fn list_scripts(&self, host: &Host) -> std::result::Result<Vec<String>, TransportError> {
        Ok(self.client(host)?.list_scripts().await?)
    }

    async fn run_script(
        &self,
        host: &Host,
        script_name: &str,
    ) -> std::result::Result<ExecutionResult, TransportError> {
        Ok(self.client(host)?.run_script(script_name).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bad_base_url_is_transport_error() {
        let endpoint = HttpExecutionEndpoint::new(Duration::from_secs(1)).unwrap();
        let host = Host::new("broken", "not-a-url");

        let result = endpoint.list_scripts(&host).await;

        assert!(matches!(result, Err(TransportError::Transport(_))));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let endpoint = HttpExecutionEndpoint::new(Duration::from_secs(2)).unwrap();
        // Port 9 (discard) on loopback is closed on test machines
        let host = Host::new("down", "http://127.0.0.1:9");

        let result = endpoint.run_script(&host, "a.sh").await;

        assert!(matches!(result, Err(TransportError::Transport(_))));
    }
}
