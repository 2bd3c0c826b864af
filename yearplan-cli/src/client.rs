//! HTTP client for the yearplan server's events endpoint

use std::time::Duration;

use reqwest::{Response, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use yearplan_core::protocol::{EVENTS_PATH, ErrorResponse, PersistRequest};

const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Why a call to the server failed.
///
/// Only `Unauthorized` says anything about the password; everything else is
/// transient and must not be treated as a reason to forget it.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Server rejected the password")]
    Unauthorized,

    #[error("Failed to connect to server: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server answered {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("Unexpected response from server: {0}")]
    Malformed(String),
}

/// HTTP client for yearplan-server
#[derive(Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteClient {
    pub fn new(base_url: &str) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn events_url(&self) -> String {
        format!("{}{}", self.base_url, EVENTS_PATH)
    }

    /// GET /events
    ///
    /// Returns the body undecoded so each day can be decoded on its own.
    pub async fn fetch_snapshot(&self, token: &str) -> Result<Value, RemoteError> {
        debug!(url = %self.events_url(), "fetching events");
        let resp = self
            .http
            .get(self.events_url())
            .bearer_auth(token)
            .send()
            .await?;

        let resp = check(resp).await?;
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| RemoteError::Malformed(e.to_string()))
    }

    /// POST /events
    pub async fn persist(&self, token: &str, request: &PersistRequest) -> Result<(), RemoteError> {
        debug!(url = %self.events_url(), date = %request.date, "saving events");
        let resp = self
            .http
            .post(self.events_url())
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;

        check(resp).await?;
        Ok(())
    }
}

async fn check(resp: Response) -> Result<Response, RemoteError> {
    let status = resp.status();

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(RemoteError::Unauthorized);
    }

    if !status.is_success() {
        let text = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&text)
            .map(|err| err.error)
            .unwrap_or(text);
        return Err(RemoteError::Status { status, message });
    }

    Ok(resp)
}
