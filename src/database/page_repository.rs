//! Page repository: static pages, independent of the category tree.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{NewPage, Page};

#[derive(Clone)]
pub struct PageRepository {
    pool: PgPool,
}

impl PageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> ApiResult<Vec<Page>> {
        let pages = sqlx::query_as::<_, Page>("SELECT * FROM pages ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(pages)
    }

    pub async fn get_by_id(&self, id: Uuid) -> ApiResult<Page> {
        sqlx::query_as::<_, Page>("SELECT * FROM pages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ApiError::NotFound("Page"))
    }

    pub async fn create(&self, new: NewPage) -> ApiResult<Page> {
        if new.slug.trim().is_empty() {
            return Err(ApiError::Validation("slug is required".to_string()));
        }

        let page = sqlx::query_as::<_, Page>(
            r#"
            INSERT INTO pages (slug, attributes)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(&new.slug)
        .bind(&new.attributes)
        .fetch_one(&self.pool)
        .await?;

        Ok(page)
    }
}
