//! HTTP plumbing shared by both catalog adapters.
//!
//! One GET per call: wait the fixed delay, send, classify the status, decode
//! the JSON body. Failures are logged and handed back to the caller; nothing
//! is retried.

pub mod delay;

pub use delay::RequestDelay;

use crate::error::{ApiError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Query parameters in send order; repeated keys encode arrays
pub type Query = Vec<(&'static str, String)>;

/// GET-only JSON client bound to one upstream API
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// HTTP client
    client: Client,
    /// Base URL the request paths are appended to
    base_url: String,
    /// Delay applied before every request
    delay: RequestDelay,
    /// Upstream name used in log fields
    source: &'static str,
}

impl HttpClient {
    /// Create a client for `base_url`
    pub fn new(
        source: &'static str,
        base_url: impl Into<String>,
        delay: RequestDelay,
        timeout: Option<Duration>,
    ) -> anyhow::Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            "animanga/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            delay,
            source,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a GET for `path` with `query` and decode the JSON body as `T`
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &Query) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        self.delay.wait().await;

        debug!(source = self.source, url = %url, params = query.len(), "Making API request");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                warn!(source = self.source, url = %url, error = %e, "Request error");
                ApiError::Transport {
                    url: url.clone(),
                    status: e.status().map(|s| s.as_u16()),
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                source = self.source,
                url = %url,
                status = %status,
                "Request failed"
            );
            return Err(ApiError::from_status(&url, status.as_u16(), body));
        }

        let body = response.text().await.map_err(|e| {
            warn!(source = self.source, url = %url, error = %e, "Failed to read response body");
            ApiError::Transport {
                url: url.clone(),
                status: Some(status.as_u16()),
                message: e.to_string(),
            }
        })?;

        match serde_json::from_str::<T>(&body) {
            Ok(data) => {
                debug!(source = self.source, url = %url, bytes = body.len(), "Request successful");
                Ok(data)
            }
            Err(e) => {
                warn!(source = self.source, url = %url, error = %e, "Failed to parse response");
                Err(ApiError::Malformed {
                    url,
                    message: e.to_string(),
                })
            }
        }
    }
}

/// Run `fut` unless `token` fires first, in which case the result is dropped
pub async fn cancellable<T, F>(token: &CancellationToken, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => {
            debug!("Fetch cancelled, discarding result");
            Err(ApiError::Cancelled)
        }
        result = fut => result,
    }
}
