//! Read-only calls against a fullnode's REST API

use delegacy_common::prelude::*;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::function::ViewRequest;

/// Error body returned by the node for rejected requests
#[derive(Debug, Deserialize)]
struct NodeError {
    message: String,
    #[serde(default)]
    error_code: Option<String>,
}

/// HTTP client for `POST <rpc_url>/view`
#[derive(Debug, Clone)]
pub struct FullnodeClient {
    http: reqwest::Client,
    base_url: String,
}

impl FullnodeClient {
    pub fn new(rpc_url: &str, timeout: Duration) -> DelegacyResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DelegacyError::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: rpc_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute a view function and return its result values
    pub async fn view(&self, request: &ViewRequest) -> DelegacyResult<Vec<Value>> {
        let url = format!("{}/view", self.base_url);
        debug!(function = %request.function, args = request.arguments.len(), "view call");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| DelegacyError::network(format!("View request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<NodeError>(&body) {
                Ok(err) => match err.error_code {
                    Some(code) => format!("{} ({})", err.message, code),
                    None => err.message,
                },
                Err(_) => body,
            };
            return Err(DelegacyError::query(format!(
                "{} returned {}: {}",
                request.function, status, message
            )));
        }

        response.json::<Vec<Value>>().await.map_err(|e| {
            DelegacyError::decode(format!("Invalid view result for {}: {}", request.function, e))
        })
    }
}
