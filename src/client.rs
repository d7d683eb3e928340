//! Main Product Hunt client implementation.

use crate::envelope::{extract_post, extract_posts, Node};
use crate::error::{Error, Result};
use crate::query;
use crate::transport::{HttpTransport, Transport};
use crate::types::Product;
use reqwest::header::HeaderValue;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Product Hunt GraphQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.producthunt.com/v2/api/graphql";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_RETRIES: u32 = 0;

const API_KEY_ENV: &str = "PRODUCTHUNT_API_KEY";
const ENDPOINT_ENV: &str = "PRODUCTHUNT_ENDPOINT";

/// Builder for constructing a [`Client`].
pub struct ClientBuilder {
    api_key: String,
    endpoint: String,
    timeout: Duration,
    max_retries: u32,
    user_agent_suffix: Option<String>,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    /// Create a new client builder with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            user_agent_suffix: None,
            transport: None,
        }
    }

    /// Create a builder from `PRODUCTHUNT_API_KEY` and, if set,
    /// `PRODUCTHUNT_ENDPOINT`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| Error::Config(format!("{} is not set", API_KEY_ENV)))?;
        let mut builder = Self::new(api_key);
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            builder = builder.endpoint(endpoint);
        }
        Ok(builder)
    }

    /// Set the GraphQL endpoint URL.
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum retry attempts of the built-in HTTP transport.
    ///
    /// Defaults to zero: each operation sends exactly one request.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set a custom User-Agent suffix.
    pub fn user_agent_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.user_agent_suffix = Some(suffix.into());
        self
    }

    /// Use a custom transport instead of the built-in HTTP one.
    ///
    /// Endpoint, timeout, retry and User-Agent settings are ignored when a
    /// transport is supplied.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<Client> {
        if self.api_key.is_empty() {
            return Err(Error::Config("API key is required".into()));
        }
        if HeaderValue::from_str(&format!("Bearer {}", self.api_key)).is_err() {
            return Err(Error::Config(
                "API key contains invalid header characters".into(),
            ));
        }

        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                if !self.endpoint.starts_with("https://") {
                    warn!(
                        endpoint = %self.endpoint,
                        "GraphQL endpoint is not using HTTPS. This is insecure."
                    );
                }
                Arc::new(HttpTransport::new(
                    self.endpoint,
                    self.timeout,
                    self.max_retries,
                    self.user_agent_suffix.as_deref(),
                )?)
            }
        };

        Ok(Client {
            api_key: self.api_key,
            transport,
        })
    }
}

/// Client for the Product Hunt GraphQL API.
///
/// Each operation sends one fixed query and maps the response into
/// [`Product`] records. Edges whose node is missing or malformed are dropped;
/// a response without the expected `data` path fails the whole call with
/// [`Error::MalformedResponse`].
///
/// # Example
///
/// ```rust,no_run
/// use producthunt::Client;
///
/// #[tokio::main]
/// async fn main() -> Result<(), producthunt::Error> {
///     let client = Client::builder("your-api-key").build()?;
///
///     for product in client.list_newest().await? {
///         println!("{}: {}", product.name, product.tagline);
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Client {
    api_key: String,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_key", &"*****")
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a new client builder.
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    /// The ten newest posts (id, name, tagline).
    pub async fn list_newest(&self) -> Result<Vec<Product>> {
        let raw = self.execute(&query::newest_posts()).await?;
        let products = extract_posts(raw, summary)?;
        debug!(count = products.len(), "list_newest");
        Ok(products)
    }

    /// Look up a single post by slug (name, tagline, description, website).
    ///
    /// Returns `Ok(None)` when no post matches.
    pub async fn get_details(&self, slug: &str) -> Result<Option<Product>> {
        let raw = self.execute(&query::post_details(slug)).await?;
        let product = extract_post(raw, details)?;
        debug!(slug = slug, found = product.is_some(), "get_details");
        Ok(product)
    }

    /// Up to 99 newest posts in `topic`, with every field and the thumbnail.
    pub async fn list_by_topic(&self, topic: &str) -> Result<Vec<Product>> {
        let raw = self.execute(&query::posts_by_topic(topic)).await?;
        let products = extract_posts(raw, full)?;
        debug!(topic = topic, count = products.len(), "list_by_topic");
        Ok(products)
    }

    /// Top five posts by ranking on the UTC day `date` (`YYYY-MM-DD`),
    /// with id, name and tagline.
    pub async fn list_top_by_date(&self, date: &str) -> Result<Vec<Product>> {
        let raw = self.execute(&query::top_posts_by_date(date)).await?;
        let products = extract_posts(raw, summary)?;
        debug!(date = date, count = products.len(), "list_top_by_date");
        Ok(products)
    }

    /// Top `limit` posts by ranking on the UTC day `date` (`YYYY-MM-DD`),
    /// with id, name, tagline, description, website and url.
    pub async fn list_ranked_by_date(&self, date: &str, limit: u32) -> Result<Vec<Product>> {
        let raw = self
            .execute(&query::ranked_posts_by_date(date, limit))
            .await?;
        let products = extract_posts(raw, ranked)?;
        debug!(
            date = date,
            limit = limit,
            count = products.len(),
            "list_ranked_by_date"
        );
        Ok(products)
    }

    async fn execute(&self, query: &str) -> Result<serde_json::Value> {
        self.transport.execute(query, &self.api_key).await
    }
}

fn summary(node: &Node) -> Product {
    Product {
        id: node.text("id"),
        name: node.text("name"),
        tagline: node.text("tagline"),
        ..Default::default()
    }
}

fn details(node: &Node) -> Product {
    Product {
        name: node.text("name"),
        tagline: node.text("tagline"),
        description: node.text("description"),
        website: node.text("website"),
        ..Default::default()
    }
}

fn full(node: &Node) -> Product {
    Product {
        id: node.text("id"),
        name: node.text("name"),
        tagline: node.text("tagline"),
        slug: node.text("slug"),
        description: node.text("description"),
        website: node.text("website"),
        url: node.text("url"),
        thumbnail: node.nested_text("thumbnail", "url"),
    }
}

fn ranked(node: &Node) -> Product {
    Product {
        id: node.text("id"),
        name: node.text("name"),
        tagline: node.text("tagline"),
        description: node.text("description"),
        website: node.text("website"),
        url: node.text("url"),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_api_key() {
        let err = Client::builder("").build().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_build_rejects_invalid_header_key() {
        let err = Client::builder("bad\nkey").build().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_retries_default_to_zero() {
        assert_eq!(ClientBuilder::new("key").max_retries, 0);
    }

    #[test]
    fn test_debug_masks_api_key() {
        let client = Client::builder("super-secret").build().unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("*****"));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let builder = ClientBuilder::new("key").endpoint("http://localhost:8080/graphql/");
        assert_eq!(builder.endpoint, "http://localhost:8080/graphql");
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Client>();
    }
}
