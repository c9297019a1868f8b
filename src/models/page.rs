//! Static page documents. Pages are independent of the category tree and
//! contribute only to the sitemap.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: Uuid,
    pub slug: String,
    pub attributes: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPage {
    pub slug: String,
    #[serde(default = "default_attributes")]
    pub attributes: serde_json::Value,
}

fn default_attributes() -> serde_json::Value {
    serde_json::json!({})
}

/// Turn a keyword into a URL slug: lowercase, spaces to hyphens, strip
/// everything that is not a word character or hyphen, collapse runs.
pub fn slugify(keyword: &str) -> String {
    let mut slug = String::with_capacity(keyword.len());
    let mut last_hyphen = true; // suppress leading hyphens
    for c in keyword.trim().chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() || c == '_' {
            slug.push(c);
            last_hyphen = false;
        } else if (c.is_whitespace() || c == '-') && !last_hyphen {
            slug.push('-');
            last_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("AI Tattoo Generator"), "ai-tattoo-generator");
    }

    #[test]
    fn test_slugify_strips_punctuation() {
        assert_eq!(slugify("3D render, free!"), "3d-render-free");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("  anime --  style  "), "anime-style");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify("!!!"), "");
    }
}
