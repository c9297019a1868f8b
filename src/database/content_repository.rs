//! Content repository: CRUD over content items, each owned by one section.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{Content, NewContent, UpdateContent};

#[derive(Clone)]
pub struct ContentRepository {
    pool: PgPool,
}

impl ContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, section: Option<Uuid>) -> ApiResult<Vec<Content>> {
        let contents = match section {
            Some(section_id) => {
                sqlx::query_as::<_, Content>(
                    "SELECT * FROM contents WHERE section = $1 ORDER BY created_at ASC",
                )
                .bind(section_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Content>("SELECT * FROM contents ORDER BY created_at ASC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(contents)
    }

    pub async fn get_by_id(&self, id: Uuid) -> ApiResult<Content> {
        sqlx::query_as::<_, Content>("SELECT * FROM contents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ApiError::NotFound("Content"))
    }

    pub async fn create(&self, new: NewContent) -> ApiResult<Content> {
        let section_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM sections WHERE id = $1)")
                .bind(new.section)
                .fetch_one(&self.pool)
                .await?;

        if !section_exists {
            return Err(ApiError::Validation(format!(
                "section {} does not exist",
                new.section
            )));
        }

        let content = sqlx::query_as::<_, Content>(
            r#"
            INSERT INTO contents (section, attributes)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(new.section)
        .bind(&new.attributes)
        .fetch_one(&self.pool)
        .await?;

        Ok(content)
    }

    pub async fn update(&self, id: Uuid, update: UpdateContent) -> ApiResult<Content> {
        sqlx::query_as::<_, Content>(
            r#"
            UPDATE contents SET
                section = COALESCE($2, section),
                attributes = COALESCE($3, attributes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.section)
        .bind(update.attributes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ApiError::NotFound("Content"))
    }

    pub async fn delete(&self, id: Uuid) -> ApiResult<()> {
        let result = sqlx::query("DELETE FROM contents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Content"));
        }

        Ok(())
    }
}
