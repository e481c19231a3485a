use serde::Serialize;

/// A single indexed file. `key` is the file path relative to the index root and is
/// the only identity the store knows about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub key: String,
    /// Unix milliseconds.
    pub last_modified: i64,
    pub body: String,
}

impl Document {
    pub fn new(key: impl Into<String>, last_modified: i64, body: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            last_modified,
            body: body.into(),
        }
    }
}

/// One ranked search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub path: String,
    pub last_modified: i64,
    pub score: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
}

/// Render a hit as `=== path (local time) ===` followed by its excerpt.
#[must_use]
pub fn format_hit(hit: &SearchHit) -> String {
    format!(
        "=== {} ({}) ===\n{}",
        hit.path,
        format_timestamp(hit.last_modified),
        hit.excerpt.as_deref().unwrap_or_default()
    )
}

fn format_timestamp(unix_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(unix_ms).map_or_else(
        || unix_ms.to_string(),
        |utc| {
            utc.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S %Z")
                .to_string()
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_header_and_excerpt() {
        let hit = SearchHit {
            path: "docs/a.txt".into(),
            last_modified: 1_551_392_275_000,
            score: 1.5,
            excerpt: Some("the *fox* jumps".into()),
        };
        let text = format_hit(&hit);
        assert!(text.starts_with("=== docs/a.txt ("));
        assert!(text.contains("2019-0"));
        assert!(text.ends_with(") ===\nthe *fox* jumps"));
    }

    #[test]
    fn missing_excerpt_renders_empty_body() {
        let hit = SearchHit {
            path: "b.txt".into(),
            last_modified: 0,
            score: 0.1,
            excerpt: None,
        };
        assert!(format_hit(&hit).ends_with("===\n"));
    }
}
