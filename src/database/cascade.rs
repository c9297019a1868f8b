//! Cascade deletion coordinator.
//!
//! Deleting a category takes its whole owned subtree with it: contents in the
//! category's sections, the sections themselves, then the category. The
//! sequence runs inside one transaction so a concurrent reader never observes
//! a category deleted while its sections still exist.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::DeletedItems;

#[derive(Clone)]
pub struct CascadeDeletionCoordinator {
    pool: PgPool,
}

impl CascadeDeletionCoordinator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Delete a category together with all sections owned by it and all
    /// contents owned by those sections. Returns exact per-collection counts.
    pub async fn delete_category_cascade(&self, category_id: Uuid) -> ApiResult<DeletedItems> {
        let mut tx = self.pool.begin().await?;

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
            .bind(category_id)
            .fetch_one(&mut *tx)
            .await?;
        if !exists {
            return Err(ApiError::NotFound("Category"));
        }

        let section_ids: Vec<Uuid> =
            sqlx::query_scalar("SELECT id FROM sections WHERE category = $1")
                .bind(category_id)
                .fetch_all(&mut *tx)
                .await?;

        let mut deleted = DeletedItems {
            category: 1,
            sections: 0,
            contents: 0,
        };

        if !section_ids.is_empty() {
            deleted.contents = sqlx::query("DELETE FROM contents WHERE section = ANY($1)")
                .bind(&section_ids)
                .execute(&mut *tx)
                .await?
                .rows_affected();

            deleted.sections = sqlx::query("DELETE FROM sections WHERE id = ANY($1)")
                .bind(&section_ids)
                .execute(&mut *tx)
                .await?
                .rows_affected();
        }

        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(category_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            category_id = %category_id,
            sections = deleted.sections,
            contents = deleted.contents,
            "cascade delete completed"
        );

        Ok(deleted)
    }
}
