//! Transport capability used by the client to run GraphQL queries.

use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Executes a GraphQL query and returns the decoded JSON body.
///
/// Timeouts, retries and connection handling belong to the implementation;
/// the client issues exactly one `execute` call per operation.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `query` authenticated with `credential`.
    async fn execute(&self, query: &str, credential: &str) -> Result<Value>;
}

#[derive(Serialize)]
struct QueryBody<'a> {
    query: &'a str,
}

/// Default [`Transport`] that POSTs to a GraphQL endpoint over HTTP.
///
/// With `max_retries` above zero, network errors, rate limits (429) and server
/// errors (5xx) are retried with exponential backoff. Zero sends exactly one
/// request per query.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    endpoint: String,
    http_client: reqwest::Client,
    user_agent: String,
    max_retries: u32,
}

impl HttpTransport {
    /// Create a transport for `endpoint`.
    ///
    /// `user_agent_suffix` is appended to the `ProductHunt-Rust/<version>`
    /// User-Agent.
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Duration,
        max_retries: u32,
        user_agent_suffix: Option<&str>,
    ) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            endpoint: endpoint.into(),
            http_client,
            user_agent: user_agent(user_agent_suffix),
            max_retries,
        })
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn headers(&self, credential: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", credential))
            .map_err(|_| {
                Error::Transport("API key contains invalid header characters".into())
            })?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let user_agent = HeaderValue::from_str(&self.user_agent)
            .map_err(|_| {
                Error::Transport("User-Agent contains invalid header characters".into())
            })?;
        headers.insert(USER_AGENT, user_agent);
        Ok(headers)
    }

    async fn send_with_retry(
        &self,
        headers: HeaderMap,
        body: &QueryBody<'_>,
    ) -> Result<reqwest::Response> {
        let mut attempt = 1;
        loop {
            let req = self
                .http_client
                .post(&self.endpoint)
                .headers(headers.clone())
                .json(body);

            let response = match req.send().await {
                Ok(r) => r,
                Err(e) => {
                    if e.is_timeout() {
                        return Err(Error::Timeout);
                    }
                    // Retry on network errors
                    if attempt <= self.max_retries {
                        let backoff = backoff_for(attempt);
                        warn!(
                            error = %e,
                            attempt = attempt,
                            max_retries = self.max_retries,
                            "Network error. Retrying in {:?}",
                            backoff
                        );
                        sleep(backoff).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(Error::Http(e));
                }
            };

            let status = response.status();

            if status.as_u16() == 429 && attempt <= self.max_retries {
                let retry_after = retry_after_secs(response.headers());
                warn!(
                    retry_after = retry_after,
                    attempt = attempt,
                    max_retries = self.max_retries,
                    "Rate limited. Retrying"
                );
                sleep(Duration::from_secs(retry_after)).await;
                attempt += 1;
                continue;
            }

            if status.is_server_error() && attempt <= self.max_retries {
                let backoff = backoff_for(attempt);
                warn!(
                    status = %status,
                    attempt = attempt,
                    max_retries = self.max_retries,
                    "Server error. Retrying in {:?}",
                    backoff
                );
                sleep(backoff).await;
                attempt += 1;
                continue;
            }

            return Ok(response);
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, query: &str, credential: &str) -> Result<Value> {
        let headers = self.headers(credential)?;
        let body = QueryBody { query };
        let response = self.send_with_retry(headers, &body).await?;

        // GraphQL errors often arrive with a non-2xx status; the body is still
        // decoded so the envelope check can report them.
        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout
            } else {
                Error::Http(e)
            }
        })?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

const MAX_BACKOFF_SECS: u64 = 30;

fn backoff_for(attempt: u32) -> Duration {
    Duration::from_secs(2u64.saturating_pow(attempt - 1).min(MAX_BACKOFF_SECS))
}

/// Seconds to wait after a 429, from `Retry-After` (default 1, capped).
fn retry_after_secs(headers: &HeaderMap) -> u64 {
    headers
        .get("Retry-After")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(1)
        .min(MAX_BACKOFF_SECS)
}

fn user_agent(suffix: Option<&str>) -> String {
    let ua = format!(
        "ProductHunt-Rust/{} ({}; {})",
        crate::SDK_VERSION,
        std::env::consts::OS,
        std::env::consts::ARCH
    );
    match suffix {
        Some(s) => format!("{ua} {s}"),
        None => ua,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_is_capped() {
        assert_eq!(backoff_for(1), Duration::from_secs(1));
        assert_eq!(backoff_for(3), Duration::from_secs(4));
        assert_eq!(backoff_for(6), Duration::from_secs(30));
    }

    #[test]
    fn test_retry_after_is_capped() {
        let mut headers = HeaderMap::new();
        assert_eq!(retry_after_secs(&headers), 1);

        headers.insert("Retry-After", HeaderValue::from_static("7"));
        assert_eq!(retry_after_secs(&headers), 7);

        headers.insert("Retry-After", HeaderValue::from_static("3600"));
        assert_eq!(retry_after_secs(&headers), 30);
    }

    #[test]
    fn test_user_agent() {
        let ua = user_agent(None);
        assert!(ua.starts_with("ProductHunt-Rust/"));
        assert!(ua.contains(crate::SDK_VERSION));
        assert!(user_agent(Some("MyApp/1.0")).ends_with(" MyApp/1.0"));
    }

    #[test]
    fn test_headers() {
        let transport =
            HttpTransport::new("https://example.com", Duration::from_secs(5), 0, Some("ua/1"))
                .unwrap();
        let headers = transport.headers("secret").unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer secret");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert!(headers[USER_AGENT].to_str().unwrap().ends_with(" ua/1"));
    }

    #[test]
    fn test_invalid_credential_is_transport_error() {
        let transport =
            HttpTransport::new("https://example.com", Duration::from_secs(5), 0, None).unwrap();
        let err = transport.headers("bad\nkey").unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert!(err.is_transport());
    }
}
