//! HTTP fetch client with timeout and retry.

use crate::policy::FetchPolicy;
use crate::FetchError;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// JSON-over-HTTP client bound to a base URL.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: String,
    policy: FetchPolicy,
}

impl FetchClient {
    /// Create a client for `base_url` with the default policy.
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_policy(base_url, FetchPolicy::default())
    }

    /// Create a client for `base_url` with an explicit policy.
    pub fn with_policy(base_url: impl Into<String>, policy: FetchPolicy) -> Result<Self, FetchError> {
        let base_url = base_url.into();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(FetchError::InvalidUrl(base_url));
        }

        let http = reqwest::Client::builder()
            .connect_timeout(policy.timeout.connect)
            .timeout(policy.timeout.total)
            .build()
            .map_err(|e| FetchError::RequestError(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            policy,
        })
    }

    /// The base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The active fetch policy.
    pub fn policy(&self) -> &FetchPolicy {
        &self.policy
    }

    /// Resolve a path against the base URL.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// GET `path` and decode the JSON body, retrying per the policy.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self.url(path);
        let mut attempt = 0;

        loop {
            match self.get_once(&url).await {
                Ok(value) => return Ok(value),
                Err(err) if self.policy.retry.should_retry(&err, attempt) => {
                    let delay = self.policy.retry.backoff.delay_for_attempt(attempt);
                    warn!(%url, attempt, ?delay, error = %err, "retrying request");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn get_once<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        debug!(%url, "GET");

        let response = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(FetchError::NotFound {
                url: url.to_string(),
            });
        }
        if !(200..300).contains(&status) {
            return Err(FetchError::HttpError {
                status,
                url: url.to_string(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.map_transport(e))?;
        serde_json::from_slice(&body).map_err(|e| FetchError::ParseError {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    fn map_transport(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.policy.timeout.total)
        } else if err.is_connect() {
            FetchError::Connection(err.to_string())
        } else {
            FetchError::RequestError(err.to_string())
        }
    }
}
