//! Category / section / content documents and their request payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Hierarchical category document. `parent = None` means root level;
/// `is_folder` marks whether children may exist under it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub parent: Option<Uuid>,
    pub is_folder: bool,
    pub attributes: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category with its direct children attached (one level, not recursive).
/// Folders are lazily expanded; non-folders carry an empty list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithChildren {
    #[serde(flatten)]
    pub category: Category,
    pub children: Vec<Category>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub parent: Option<Uuid>,
    #[serde(default)]
    pub is_folder: bool,
    #[serde(default = "default_attributes")]
    pub attributes: serde_json::Value,
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub parent: Option<Uuid>,
    pub is_folder: Option<bool>,
    pub attributes: Option<serde_json::Value>,
}

/// Section document, owned by exactly one category.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: Uuid,
    pub category: Uuid,
    pub attributes: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSection {
    pub category: Uuid,
    #[serde(default = "default_attributes")]
    pub attributes: serde_json::Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSection {
    pub category: Option<Uuid>,
    pub attributes: Option<serde_json::Value>,
}

/// Content document, owned by exactly one section.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub id: Uuid,
    pub section: Uuid,
    pub attributes: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContent {
    pub section: Uuid,
    #[serde(default = "default_attributes")]
    pub attributes: serde_json::Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContent {
    pub section: Option<Uuid>,
    pub attributes: Option<serde_json::Value>,
}

/// Summary returned by the cascade deletion coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedItems {
    pub category: u64,
    pub sections: u64,
    pub contents: u64,
}

fn default_attributes() -> serde_json::Value {
    serde_json::json!({})
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category_defaults() {
        let payload: NewCategory =
            serde_json::from_str(r#"{"name": "3D Render", "slug": "3d-render"}"#).unwrap();
        assert_eq!(payload.name, "3D Render");
        assert!(payload.parent.is_none());
        assert!(!payload.is_folder);
        assert_eq!(payload.attributes, serde_json::json!({}));
    }

    #[test]
    fn test_category_serializes_camel_case() {
        let category = Category {
            id: Uuid::nil(),
            name: "Anime".to_string(),
            slug: "anime".to_string(),
            parent: None,
            is_folder: true,
            attributes: serde_json::json!({}),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(json["isFolder"], serde_json::json!(true));
        assert!(json.get("createdAt").is_some());
        assert!(json.get("is_folder").is_none());
    }

    #[test]
    fn test_update_category_partial() {
        let payload: UpdateCategory = serde_json::from_str(r#"{"name": "Renamed"}"#).unwrap();
        assert_eq!(payload.name.as_deref(), Some("Renamed"));
        assert!(payload.slug.is_none());
        assert!(payload.attributes.is_none());
    }
}
