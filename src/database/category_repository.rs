//! Category repository: CRUD over the hierarchical taxonomy collection.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{Category, CategoryWithChildren, NewCategory, UpdateCategory};

#[derive(Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Root categories when `parent` is None, otherwise the direct children
    /// of the given category. Name-ascending, full result set.
    pub async fn list_root_or_children(&self, parent: Option<Uuid>) -> ApiResult<Vec<Category>> {
        let categories = match parent {
            Some(parent_id) => {
                sqlx::query_as::<_, Category>(
                    "SELECT * FROM categories WHERE parent = $1 ORDER BY name ASC",
                )
                .bind(parent_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Category>(
                    "SELECT * FROM categories WHERE parent IS NULL ORDER BY name ASC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(categories)
    }

    /// Every category, for sitemap regeneration.
    pub async fn list_all(&self) -> ApiResult<Vec<Category>> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(categories)
    }

    pub async fn get_by_id(&self, id: Uuid) -> ApiResult<CategoryWithChildren> {
        let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ApiError::NotFound("Category"))?;

        self.attach_children(category).await
    }

    /// Slug lookup scoped to root level, or to the parent resolved by
    /// `parent_slug` when given. Fails NotFound if the parent slug does not
    /// resolve, even when a root-level category with `slug` exists.
    pub async fn get_by_slug(
        &self,
        slug: &str,
        parent_slug: Option<&str>,
    ) -> ApiResult<CategoryWithChildren> {
        let category = match parent_slug {
            Some(parent_slug) => {
                let parent_id: Uuid =
                    sqlx::query_scalar("SELECT id FROM categories WHERE slug = $1")
                        .bind(parent_slug)
                        .fetch_optional(&self.pool)
                        .await?
                        .ok_or(ApiError::NotFound("Parent category"))?;

                sqlx::query_as::<_, Category>(
                    "SELECT * FROM categories WHERE slug = $1 AND parent = $2",
                )
                .bind(slug)
                .bind(parent_id)
                .fetch_optional(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Category>(
                    "SELECT * FROM categories WHERE slug = $1 AND parent IS NULL",
                )
                .bind(slug)
                .fetch_optional(&self.pool)
                .await?
            }
        };

        let category = category.ok_or(ApiError::NotFound("Category"))?;
        self.attach_children(category).await
    }

    pub async fn create(&self, new: NewCategory) -> ApiResult<Category> {
        if new.name.trim().is_empty() {
            return Err(ApiError::Validation("name is required".to_string()));
        }
        if new.slug.trim().is_empty() {
            return Err(ApiError::Validation("slug is required".to_string()));
        }

        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, slug, parent, is_folder, attributes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&new.name)
        .bind(&new.slug)
        .bind(new.parent)
        .bind(new.is_folder)
        .bind(&new.attributes)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    /// Partial field merge; absent fields keep their stored value.
    pub async fn update(&self, id: Uuid, update: UpdateCategory) -> ApiResult<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                parent = COALESCE($4, parent),
                is_folder = COALESCE($5, is_folder),
                attributes = COALESCE($6, attributes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.name)
        .bind(update.slug)
        .bind(update.parent)
        .bind(update.is_folder)
        .bind(update.attributes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ApiError::NotFound("Category"))?;

        Ok(category)
    }

    /// Shallow delete: refuses with Conflict while direct children exist, so
    /// a delete can never orphan a subtree. Callers delete children first or
    /// take the cascade path.
    pub async fn delete(&self, id: Uuid) -> ApiResult<()> {
        let child_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE parent = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        if child_count > 0 {
            return Err(ApiError::Conflict { child_count });
        }

        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Category"));
        }

        Ok(())
    }

    /// Administrative escape hatch: unconditional bulk delete, bypassing the
    /// child check.
    pub async fn delete_all(&self) -> ApiResult<u64> {
        let result = sqlx::query("DELETE FROM categories")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// One-level lazy expansion: folders get their direct children attached,
    /// non-folders an empty list.
    async fn attach_children(&self, category: Category) -> ApiResult<CategoryWithChildren> {
        let children = if category.is_folder {
            sqlx::query_as::<_, Category>(
                "SELECT * FROM categories WHERE parent = $1 ORDER BY name ASC",
            )
            .bind(category.id)
            .fetch_all(&self.pool)
            .await?
        } else {
            Vec::new()
        };

        Ok(CategoryWithChildren { category, children })
    }
}
