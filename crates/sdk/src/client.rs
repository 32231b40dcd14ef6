//! Script Relay Client Implementation

use crate::error::{Result, SdkError};
use crate::types::{
    ErrorResponse, ExecutionResult, HealthResponse, ListScriptsResponse, RunScriptRequest,
};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Default per-request timeout. Script runs block the request, so this is
/// generous.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Script Relay endpoint client
///
/// # Example
///
/// ```no_run
/// use relay_sdk::RelayClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = RelayClient::connect("http://127.0.0.1:8000")?;
/// let scripts = client.list_scripts().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RelayClient {
    http: Client,
    base_url: String,
}

impl RelayClient {
    /// Create a client for one endpoint
    ///
    /// # Arguments
    ///
    /// * `url` - Endpoint base URL (e.g., `http://127.0.0.1:8000`)
    pub fn connect(url: impl AsRef<str>) -> Result<Self> {
        Self::connect_with_timeout(url, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Same as [`RelayClient::connect`] with a custom per-request timeout
    pub fn connect_with_timeout(url: impl AsRef<str>, timeout: Duration) -> Result<Self> {
        let http = build_http_client(timeout)?;
        Self::with_client(http, url)
    }

    /// Create a client sharing an existing connection pool
    pub fn with_client(http: Client, url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref().trim_end_matches('/');
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(SdkError::InvalidUrl(format!(
                "expected an http(s) URL, got '{}'",
                url
            )));
        }
        Ok(Self {
            http,
            base_url: url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List the scripts the endpoint can run
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use relay_sdk::RelayClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = RelayClient::connect("http://127.0.0.1:8000")?;
    /// for name in client.list_scripts().await? {
    ///     println!("{}", name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_scripts(&self) -> Result<Vec<String>> {
        let response = self.http.get(self.url("list_scripts")).send().await?;
        let body: ListScriptsResponse = decode(response).await?;
        Ok(body.scripts)
    }

    /// Run a script and wait for its result
    ///
    /// A script that exits non-zero is still `Ok`; inspect `return_code`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use relay_sdk::RelayClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = RelayClient::connect("http://127.0.0.1:8000")?;
    /// let result = client.run_script("backup.sh").await?;
    /// println!("exit {}: {}", result.return_code, result.output);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run_script(&self, script_name: impl Into<String>) -> Result<ExecutionResult> {
        let request = RunScriptRequest {
            script_name: script_name.into(),
        };
        let response = self
            .http
            .post(self.url("run_script"))
            .json(&request)
            .send()
            .await?;
        decode(response).await
    }

    /// Check endpoint liveness
    pub async fn health(&self) -> Result<HealthResponse> {
        let response = self.http.get(self.url("health")).send().await?;
        decode(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

pub(crate) fn build_http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| SdkError::Connection(format!("Failed to create client: {}", e)))
}

/// Decode a 2xx body, or turn the error body into `SdkError::Api`
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if status.is_success() {
        return serde_json::from_slice(&bytes).map_err(|e| SdkError::Decode(e.to_string()));
    }

    let detail = error_detail(&bytes);
    debug!(status = %status, detail = %detail, "Endpoint returned an error");
    Err(SdkError::Api {
        status: status.as_u16(),
        detail,
    })
}

/// `detail` of a JSON error body, or the raw text
fn error_detail(body: &[u8]) -> String {
    match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(err) => err.detail,
        Err(_) => String::from_utf8_lossy(body).trim().to_string(),
    }
}
