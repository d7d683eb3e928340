//! Rust client for the Product Hunt GraphQL API.
//!
//! The client runs a small set of fixed queries against the Product Hunt API
//! and maps the responses into flat [`Product`] records.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use producthunt::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), producthunt::Error> {
//!     let client = Client::builder("your-api-key").build()?;
//!
//!     let products = client.list_top_by_date("2024-03-01").await?;
//!     for product in products {
//!         println!("{} - {}", product.name, product.tagline);
//!     }
//!
//!     match client.get_details("some-product").await? {
//!         Some(product) => println!("{}", product.website),
//!         None => println!("not found"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Fields that the API returns as `null` are rendered as [`NULL_PLACEHOLDER`].

mod client;
mod envelope;
mod error;
pub mod query;
mod transport;
mod types;

pub use client::{Client, ClientBuilder, DEFAULT_ENDPOINT};
pub use envelope::{stringify, NULL_PLACEHOLDER};
pub use error::{Error, GraphQlError, Result};
pub use transport::{HttpTransport, Transport};
pub use types::Product;

/// Current crate version.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");
