//! Error types for the Product Hunt client.

use serde::Deserialize;
use thiserror::Error;

/// Result type for Product Hunt operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the Product Hunt client.
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be decoded as a JSON object.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,

    /// Failure reported by an injected transport.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The decoded envelope lacks the expected `data`/`posts`/`edges` path.
    #[error("invalid response format: missing '{missing}'{suffix}", suffix = graphql_suffix(.errors))]
    MalformedResponse {
        /// The path segment that was absent or of the wrong shape.
        missing: &'static str,
        /// GraphQL `errors` entries returned alongside the response, if any.
        errors: Vec<GraphQlError>,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether the underlying call failed before a usable envelope was decoded.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::Json(_) | Error::Timeout | Error::Transport(_)
        )
    }

    /// Whether the envelope decoded but did not have the expected shape.
    pub fn is_malformed_response(&self) -> bool {
        matches!(self, Error::MalformedResponse { .. })
    }

    pub(crate) fn malformed(missing: &'static str, errors: &[GraphQlError]) -> Self {
        Error::MalformedResponse {
            missing,
            errors: errors.to_vec(),
        }
    }
}

/// One entry of a GraphQL `errors` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GraphQlError {
    /// Human-readable error message.
    pub message: String,
}

fn graphql_suffix(errors: &[GraphQlError]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
    format!(" (graphql errors: {})", messages.join("; "))
}
