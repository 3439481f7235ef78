//! HTTP client for the App.co submission API
//!
//! Posts the submission JSON to `{api_server}/api/submit` and decodes the
//! created app from the response.

use super::payload::{SubmitRequest, SubmitResponse, SubmittedApp};
use super::traits::SubmissionApi;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::time::Duration;
use thiserror::Error;

/// Default API server
pub const DEFAULT_API_SERVER: &str = "https://api.app.co";

const ACCEPT_VALUE: &str = "application/json, text/plain, */*";

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("submission request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("submission rejected with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode submission response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client for the submission endpoint
pub struct HttpSubmissionClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpSubmissionClient {
    /// Create a client for the given API server
    pub fn new(api_server: &str, timeout: Duration) -> Result<Self, SubmitError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http, api_server))
    }

    /// Wrap an already configured reqwest client
    pub fn with_client(http: reqwest::Client, api_server: &str) -> Self {
        Self {
            http,
            endpoint: submit_endpoint(api_server),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// `{api_server}/api/submit`, tolerating a trailing slash on the server
pub fn submit_endpoint(api_server: &str) -> String {
    format!("{}/api/submit", api_server.trim_end_matches('/'))
}

#[async_trait]
impl SubmissionApi for HttpSubmissionClient {
    async fn submit(&self, request: SubmitRequest) -> Result<SubmittedApp, SubmitError> {
        let body = serde_json::to_vec(&request.payload)?;

        let mut builder = self
            .http
            .post(&self.endpoint)
            .header(ACCEPT, ACCEPT_VALUE)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        if let Some(token) = &request.bearer_token {
            builder = builder.bearer_auth(token);
        }

        tracing::debug!(
            endpoint = %self.endpoint,
            authorized = request.bearer_token.is_some(),
            "posting submission"
        );
        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(SubmitError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: SubmitResponse = serde_json::from_str(&text)?;
        Ok(parsed.app)
    }
}
