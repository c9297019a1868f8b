//! Blog repository: post listing with title search, URL lookup, and edits.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{BlogPost, UpdateBlogPost};

#[derive(Clone)]
pub struct BlogRepository {
    pool: PgPool,
}

impl BlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All posts, optionally filtered by a case-insensitive title search.
    pub async fn list(&self, search: Option<&str>) -> ApiResult<Vec<BlogPost>> {
        let posts = match search {
            Some(term) => {
                let pattern = format!("%{}%", term);
                sqlx::query_as::<_, BlogPost>(
                    "SELECT * FROM blog_posts WHERE title ILIKE $1 ORDER BY created_at DESC",
                )
                .bind(pattern)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, BlogPost>("SELECT * FROM blog_posts ORDER BY created_at DESC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(posts)
    }

    pub async fn get_by_url(&self, url: &str) -> ApiResult<BlogPost> {
        sqlx::query_as::<_, BlogPost>("SELECT * FROM blog_posts WHERE url = $1")
            .bind(url)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ApiError::NotFound("Blog post"))
    }

    pub async fn update(&self, id: Uuid, update: UpdateBlogPost) -> ApiResult<BlogPost> {
        sqlx::query_as::<_, BlogPost>(
            r#"
            UPDATE blog_posts SET
                title = COALESCE($2, title),
                url = COALESCE($3, url),
                attributes = COALESCE($4, attributes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.title)
        .bind(update.url)
        .bind(update.attributes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ApiError::NotFound("Blog post"))
    }
}
