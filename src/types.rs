//! Record types returned by the Product Hunt client.

use serde::{Deserialize, Serialize};

/// A single product (post) listed on Product Hunt.
///
/// Every field is text. Fields an operation did not request are empty; fields
/// it requested but the API returned as `null` (or omitted) hold
/// [`NULL_PLACEHOLDER`](crate::NULL_PLACEHOLDER).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Post ID as reported by the API.
    pub id: String,
    /// Product name.
    pub name: String,
    /// One-line tagline.
    pub tagline: String,
    /// URL slug.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub slug: String,
    /// Long-form description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Product website.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub website: String,
    /// Canonical Product Hunt URL.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    /// Thumbnail image URL.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub thumbnail: String,
}
