//! Section repository: CRUD over sections, each owned by one category.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{NewSection, Section, UpdateSection};

#[derive(Clone)]
pub struct SectionRepository {
    pool: PgPool,
}

impl SectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, category: Option<Uuid>) -> ApiResult<Vec<Section>> {
        let sections = match category {
            Some(category_id) => {
                sqlx::query_as::<_, Section>(
                    "SELECT * FROM sections WHERE category = $1 ORDER BY created_at ASC",
                )
                .bind(category_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Section>("SELECT * FROM sections ORDER BY created_at ASC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(sections)
    }

    pub async fn get_by_id(&self, id: Uuid) -> ApiResult<Section> {
        sqlx::query_as::<_, Section>("SELECT * FROM sections WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ApiError::NotFound("Section"))
    }

    /// The owning category must exist at creation time; orphaned sections are
    /// a data-integrity violation the cascade coordinator exists to prevent.
    pub async fn create(&self, new: NewSection) -> ApiResult<Section> {
        let category_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
                .bind(new.category)
                .fetch_one(&self.pool)
                .await?;

        if !category_exists {
            return Err(ApiError::Validation(format!(
                "category {} does not exist",
                new.category
            )));
        }

        let section = sqlx::query_as::<_, Section>(
            r#"
            INSERT INTO sections (category, attributes)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(new.category)
        .bind(&new.attributes)
        .fetch_one(&self.pool)
        .await?;

        Ok(section)
    }

    pub async fn update(&self, id: Uuid, update: UpdateSection) -> ApiResult<Section> {
        sqlx::query_as::<_, Section>(
            r#"
            UPDATE sections SET
                category = COALESCE($2, category),
                attributes = COALESCE($3, attributes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.category)
        .bind(update.attributes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ApiError::NotFound("Section"))
    }

    pub async fn delete(&self, id: Uuid) -> ApiResult<()> {
        let result = sqlx::query("DELETE FROM sections WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Section"));
        }

        Ok(())
    }
}
