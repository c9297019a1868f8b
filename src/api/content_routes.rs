//! REST routes for content items.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::AppState;
use crate::database::ContentRepository;
use crate::error::ApiResult;
use crate::models::{Content, NewContent, UpdateContent};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListContentQuery {
    pub section_id: Option<Uuid>,
}

/// GET /api/content?sectionId=
async fn list_content(
    State(state): State<AppState>,
    Query(query): Query<ListContentQuery>,
) -> ApiResult<Json<Vec<Content>>> {
    let contents = ContentRepository::new(state.pool.clone())
        .list(query.section_id)
        .await?;
    Ok(Json(contents))
}

/// GET /api/content/:id
async fn get_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Content>> {
    let content = ContentRepository::new(state.pool.clone())
        .get_by_id(id)
        .await?;
    Ok(Json(content))
}

/// POST /api/content
async fn create_content(
    State(state): State<AppState>,
    Json(payload): Json<NewContent>,
) -> ApiResult<Json<Content>> {
    let content = ContentRepository::new(state.pool.clone())
        .create(payload)
        .await?;
    Ok(Json(content))
}

/// PUT /api/content/:id
async fn update_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateContent>,
) -> ApiResult<Json<Content>> {
    let content = ContentRepository::new(state.pool.clone())
        .update(id, payload)
        .await?;
    Ok(Json(content))
}

/// DELETE /api/content/:id
async fn delete_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    ContentRepository::new(state.pool.clone()).delete(id).await?;
    Ok(Json(json!({ "message": "Content deleted successfully" })))
}

pub fn create_content_router(state: AppState) -> Router {
    Router::new()
        .route("/api/content", get(list_content).post(create_content))
        .route(
            "/api/content/:id",
            get(get_content).put(update_content).delete(delete_content),
        )
        .with_state(state)
}
