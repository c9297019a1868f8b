//! REST routes for the category taxonomy.
//!
//! Every mutation queues a sitemap refresh after it succeeds; the refresh is
//! fire-and-forget and never affects the response.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use super::AppState;
use crate::database::{CascadeDeletionCoordinator, CategoryRepository};
use crate::error::ApiResult;
use crate::models::{Category, CategoryWithChildren, DeletedItems, NewCategory, UpdateCategory};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCategoriesQuery {
    pub parent_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeDeleteResponse {
    pub message: String,
    pub deleted_items: DeletedItems,
}

/// GET /api/categories?parentId=
/// Root categories when parentId is omitted, else direct children.
async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<ListCategoriesQuery>,
) -> ApiResult<Json<Vec<Category>>> {
    let categories = CategoryRepository::new(state.pool.clone())
        .list_root_or_children(query.parent_id)
        .await?;
    Ok(Json(categories))
}

/// GET /api/categories/:id
async fn get_category_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CategoryWithChildren>> {
    let category = CategoryRepository::new(state.pool.clone())
        .get_by_id(id)
        .await?;
    Ok(Json(category))
}

/// GET /api/categories/by-slug/:slug (root-level lookup)
async fn get_category_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<CategoryWithChildren>> {
    let category = CategoryRepository::new(state.pool.clone())
        .get_by_slug(&slug, None)
        .await?;
    Ok(Json(category))
}

/// GET /api/categories/by-slug/:parent_slug/:slug
async fn get_category_by_nested_slug(
    State(state): State<AppState>,
    Path((parent_slug, slug)): Path<(String, String)>,
) -> ApiResult<Json<CategoryWithChildren>> {
    let category = CategoryRepository::new(state.pool.clone())
        .get_by_slug(&slug, Some(&parent_slug))
        .await?;
    Ok(Json(category))
}

/// POST /api/categories
async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<NewCategory>,
) -> ApiResult<Json<Category>> {
    let category = CategoryRepository::new(state.pool.clone())
        .create(payload)
        .await?;
    state.sitemap.request_refresh();
    Ok(Json(category))
}

/// PUT /api/categories/:id
async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCategory>,
) -> ApiResult<Json<Category>> {
    let category = CategoryRepository::new(state.pool.clone())
        .update(id, payload)
        .await?;
    state.sitemap.request_refresh();
    Ok(Json(category))
}

/// DELETE /api/categories/:id
/// Shallow delete: Conflict when direct children exist.
async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    CategoryRepository::new(state.pool.clone()).delete(id).await?;
    state.sitemap.request_refresh();
    Ok(Json(json!({ "message": "Category deleted successfully" })))
}

/// DELETE /api/categories/:id/with-related
/// Cascade: category, its sections, and their contents, with counts.
async fn delete_category_with_related(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CascadeDeleteResponse>> {
    let deleted_items = CascadeDeletionCoordinator::new(state.pool.clone())
        .delete_category_cascade(id)
        .await?;
    state.sitemap.request_refresh();
    Ok(Json(CascadeDeleteResponse {
        message: "Category and related content deleted successfully".to_string(),
        deleted_items,
    }))
}

/// DELETE /api/categories
/// Administrative delete-all, bypassing the child check.
async fn delete_all_categories(
    State(state): State<AppState>,
) -> ApiResult<Json<serde_json::Value>> {
    CategoryRepository::new(state.pool.clone()).delete_all().await?;
    state.sitemap.request_refresh();
    Ok(Json(json!({ "message": "All categories deleted successfully" })))
}

pub fn create_category_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/categories",
            get(list_categories)
                .post(create_category)
                .delete(delete_all_categories),
        )
        .route(
            "/api/categories/:id",
            get(get_category_by_id)
                .put(update_category)
                .delete(delete_category),
        )
        .route(
            "/api/categories/:id/with-related",
            delete(delete_category_with_related),
        )
        .route("/api/categories/by-slug/:slug", get(get_category_by_slug))
        .route(
            "/api/categories/by-slug/:parent_slug/:slug",
            get(get_category_by_nested_slug),
        )
        .with_state(state)
}
