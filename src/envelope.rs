//! Decoding of the GraphQL response envelope.
//!
//! The envelope is decoded in two stages: the `data` → `posts` → `edges` path
//! is checked strictly, while each edge is decoded on its own so a malformed
//! edge is dropped without failing the batch.

use crate::error::{Error, GraphQlError, Result};
use crate::types::Product;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Text used for a JSON `null` or an absent field.
pub const NULL_PLACEHOLDER: &str = "<nil>";

/// Render a raw JSON value as text.
///
/// - strings pass through unchanged
/// - numbers and booleans use their canonical JSON text (`42`, `1.5`, `true`)
/// - `null` becomes [`NULL_PLACEHOLDER`]
/// - arrays and objects become compact JSON
pub fn stringify(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => NULL_PLACEHOLDER.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Split a decoded body into its `data` member and any GraphQL `errors`.
///
/// A body that is not a JSON object is a decoding failure, not a malformed
/// envelope.
fn decode_envelope(raw: Value) -> Result<(Option<Value>, Vec<GraphQlError>)> {
    let mut envelope: Map<String, Value> = serde_json::from_value(raw)?;
    let errors = match envelope.remove("errors") {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|e| serde_json::from_value(e).ok())
            .collect(),
        _ => Vec::new(),
    };
    Ok((envelope.remove("data"), errors))
}

#[derive(Deserialize)]
struct Edge {
    node: Node,
}

/// A single post object from the response.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub(crate) struct Node(Map<String, Value>);

impl Node {
    /// Stringified value of a top-level field.
    pub(crate) fn text(&self, key: &str) -> String {
        stringify(self.0.get(key))
    }

    /// Stringified value of `key.inner`, or empty when `key` is not an object.
    pub(crate) fn nested_text(&self, key: &str, inner: &str) -> String {
        match self.0.get(key) {
            Some(Value::Object(sub)) => stringify(sub.get(inner)),
            _ => String::new(),
        }
    }
}

fn take_object(value: Option<Value>) -> Option<Map<String, Value>> {
    match value {
        Some(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Extract the posts of a `data.posts.edges` connection, in edge order.
///
/// Edges that are not objects, or whose `node` is missing or not an object,
/// are skipped.
pub(crate) fn extract_posts<F>(raw: Value, build: F) -> Result<Vec<Product>>
where
    F: Fn(&Node) -> Product,
{
    let (data, errors) = decode_envelope(raw)?;
    let mut data = take_object(data).ok_or_else(|| Error::malformed("data", &errors))?;
    let mut posts =
        take_object(data.remove("posts")).ok_or_else(|| Error::malformed("posts", &errors))?;
    let edges = match posts.remove("edges") {
        Some(Value::Array(edges)) => edges,
        _ => return Err(Error::malformed("edges", &errors)),
    };

    Ok(edges
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|edge| serde_json::from_value::<Edge>(edge).ok())
        .map(|edge| build(&edge.node))
        .collect())
}

/// Extract the single post of a `data.post` lookup.
///
/// A missing, `null` or non-object `post` yields `Ok(None)`.
pub(crate) fn extract_post<F>(raw: Value, build: F) -> Result<Option<Product>>
where
    F: Fn(&Node) -> Product,
{
    let (data, errors) = decode_envelope(raw)?;
    let mut data = take_object(data).ok_or_else(|| Error::malformed("data", &errors))?;
    Ok(take_object(data.remove("post")).map(|post| build(&Node(post))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summary(node: &Node) -> Product {
        Product {
            id: node.text("id"),
            name: node.text("name"),
            tagline: node.text("tagline"),
            ..Default::default()
        }
    }

    #[test]
    fn test_stringify_rules() {
        assert_eq!(stringify(Some(&json!("hello"))), "hello");
        assert_eq!(stringify(Some(&json!(42))), "42");
        assert_eq!(stringify(Some(&json!(1.5))), "1.5");
        assert_eq!(stringify(Some(&json!(true))), "true");
        assert_eq!(stringify(Some(&json!(null))), NULL_PLACEHOLDER);
        assert_eq!(stringify(None), NULL_PLACEHOLDER);
        assert_eq!(stringify(Some(&json!([1, "a"]))), r#"[1,"a"]"#);
        assert_eq!(stringify(Some(&json!({"k": 1}))), r#"{"k":1}"#);
    }

    #[test]
    fn test_extract_skips_malformed_edges() {
        let raw = json!({"data": {"posts": {"edges": [
            {"node": {"id": "1", "name": "A", "tagline": "t"}},
            {"node": null},
            "not an edge",
            {"cursor": "abc"},
            {"node": [1, 2]},
            {"node": {"id": "2", "name": "B", "tagline": "u"}}
        ]}}});

        let products = extract_posts(raw, summary).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, "1");
        assert_eq!(products[1].id, "2");
    }

    #[test]
    fn test_extract_names_missing_segment() {
        let cases = [
            (json!({}), "data"),
            (json!({"data": null}), "data"),
            (json!({"data": "oops"}), "data"),
            (json!({"data": {}}), "posts"),
            (json!({"data": {"posts": []}}), "posts"),
            (json!({"data": {"posts": {}}}), "edges"),
            (json!({"data": {"posts": {"edges": {}}}}), "edges"),
        ];

        for (raw, segment) in cases {
            match extract_posts(raw, summary) {
                Err(Error::MalformedResponse { missing, .. }) => assert_eq!(missing, segment),
                other => panic!("expected malformed '{}', got {:?}", segment, other),
            }
        }
    }

    #[test]
    fn test_extract_carries_graphql_errors() {
        let raw = json!({"errors": [{"message": "bad query"}, {"unexpected": true}]});
        match extract_posts(raw, summary) {
            Err(Error::MalformedResponse { missing, errors }) => {
                assert_eq!(missing, "data");
                assert_eq!(
                    errors,
                    vec![GraphQlError {
                        message: "bad query".into()
                    }]
                );
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_non_object_body_is_json_error() {
        let err = extract_posts(json!([1, 2, 3]), summary).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_extract_post_not_found() {
        assert!(extract_post(json!({"data": {"post": null}}), summary)
            .unwrap()
            .is_none());
        assert!(extract_post(json!({"data": {}}), summary).unwrap().is_none());
        assert!(matches!(
            extract_post(json!({"errors": []}), summary),
            Err(Error::MalformedResponse { missing: "data", .. })
        ));
    }

    #[test]
    fn test_nested_text() {
        let node: Node = serde_json::from_value(json!({
            "thumbnail": {"url": "https://img"},
            "empty": {},
            "flat": "x",
            "gone": null
        }))
        .unwrap();

        assert_eq!(node.nested_text("thumbnail", "url"), "https://img");
        assert_eq!(node.nested_text("empty", "url"), NULL_PLACEHOLDER);
        assert_eq!(node.nested_text("flat", "url"), "");
        assert_eq!(node.nested_text("gone", "url"), "");
        assert_eq!(node.nested_text("absent", "url"), "");
    }
}
