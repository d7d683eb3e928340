//! Fixed GraphQL query templates.
//!
//! Parameters are interpolated into the query text as-is. They are not escaped
//! or validated, so a value containing `"` changes the query. Only pass values
//! you trust.

/// Ten newest posts: id, name, tagline.
pub fn newest_posts() -> String {
    r#"
    query {
      posts(order: NEWEST, first: 10) {
        edges {
          node {
            id
            name
            tagline
          }
        }
      }
    }
    "#
    .to_string()
}

/// A single post by slug: name, tagline, description, website.
pub fn post_details(slug: &str) -> String {
    format!(
        r#"
    query {{
      post(slug: "{slug}") {{
        name
        tagline
        description
        website
      }}
    }}
    "#
    )
}

/// Up to 99 newest posts in a topic, with every field and the thumbnail URL.
pub fn posts_by_topic(topic: &str) -> String {
    format!(
        r#"
    query {{
      posts(order: NEWEST, first: 99, topic: "{topic}") {{
        edges {{
          node {{
            id
            name
            slug
            tagline
            description
            website
            url
            thumbnail {{
              url
            }}
          }}
        }}
      }}
    }}
    "#
    )
}

/// Top five posts by ranking within the UTC day of `date`.
///
/// The selection asks for description and website as well, though only id,
/// name and tagline are read back.
pub fn top_posts_by_date(date: &str) -> String {
    let (after, before) = day_bounds(date);
    format!(
        r#"
    query {{
      posts(order: RANKING, postedAfter: "{after}", postedBefore: "{before}", first: 5) {{
        edges {{
          node {{
            id
            name
            tagline
            description
            website
          }}
        }}
      }}
    }}
    "#
    )
}

/// Top `limit` posts by ranking within the UTC day of `date`.
pub fn ranked_posts_by_date(date: &str, limit: u32) -> String {
    let (after, before) = day_bounds(date);
    format!(
        r#"
    query {{
      posts(order: RANKING, postedAfter: "{after}", postedBefore: "{before}", first: {limit}) {{
        edges {{
          node {{
            id
            name
            tagline
            description
            website
            url
          }}
        }}
      }}
    }}"#
    )
}

/// Inclusive start and end timestamps of the UTC calendar day `date`.
fn day_bounds(date: &str) -> (String, String) {
    (format!("{date}T00:00:00Z"), format!("{date}T23:59:59Z"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_posts() {
        let q = newest_posts();
        assert!(q.contains("posts(order: NEWEST, first: 10)"));
        assert!(q.contains("tagline"));
        assert!(!q.contains("thumbnail"));
    }

    #[test]
    fn test_post_details_interpolates_slug() {
        let q = post_details("my-app");
        assert!(q.contains(r#"post(slug: "my-app")"#));
        assert!(q.contains("description"));
        assert!(q.contains("website"));
    }

    #[test]
    fn test_posts_by_topic() {
        let q = posts_by_topic("developer-tools");
        assert!(q.contains(r#"posts(order: NEWEST, first: 99, topic: "developer-tools")"#));
        assert!(q.contains("thumbnail {"));
        assert!(q.contains("slug"));
    }

    #[test]
    fn test_day_bounds() {
        let q = top_posts_by_date("2024-03-01");
        assert!(q.contains(r#"postedAfter: "2024-03-01T00:00:00Z""#));
        assert!(q.contains(r#"postedBefore: "2024-03-01T23:59:59Z""#));
        assert!(q.contains("first: 5)"));
    }

    #[test]
    fn test_ranked_posts_by_date_limit() {
        let q = ranked_posts_by_date("2024-03-01", 20);
        assert!(q.contains("order: RANKING"));
        assert!(q.contains("first: 20)"));
        assert!(q.contains("url"));
    }

    #[test]
    fn test_parameters_are_not_escaped() {
        let q = post_details(r#"x") { id } #"#);
        assert!(q.contains(r#"post(slug: "x") { id } #")"#));
    }
}
