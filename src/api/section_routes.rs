//! REST routes for sections.

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
use crate::database::SectionRepository;
use crate::error::ApiResult;
use crate::models::{NewSection, Section, UpdateSection};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSectionsQuery {
    pub category_id: Option<Uuid>,
}

/// GET /api/sections?categoryId=
async fn list_sections(
    State(state): State<AppState>,
    Query(query): Query<ListSectionsQuery>,
) -> ApiResult<Json<Vec<Section>>> {
    let sections = SectionRepository::new(state.pool.clone())
        .list(query.category_id)
        .await?;
    Ok(Json(sections))
}

/// GET /api/sections/:id
async fn get_section(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Section>> {
    let section = SectionRepository::new(state.pool.clone())
        .get_by_id(id)
        .await?;
    Ok(Json(section))
}

/// POST /api/sections
async fn create_section(
    State(state): State<AppState>,
    Json(payload): Json<NewSection>,
) -> ApiResult<Json<Section>> {
    let section = SectionRepository::new(state.pool.clone())
        .create(payload)
        .await?;
    Ok(Json(section))
}

/// PUT /api/sections/:id
async fn update_section(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSection>,
) -> ApiResult<Json<Section>> {
    let section = SectionRepository::new(state.pool.clone())
        .update(id, payload)
        .await?;
    Ok(Json(section))
}

/// DELETE /api/sections/:id
async fn delete_section(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    SectionRepository::new(state.pool.clone()).delete(id).await?;
    Ok(Json(json!({ "message": "Section deleted successfully" })))
}

pub fn create_section_router(state: AppState) -> Router {
    Router::new()
        .route("/api/sections", get(list_sections).post(create_section))
        .route(
            "/api/sections/:id",
            get(get_section).put(update_section).delete(delete_section),
        )
        .with_state(state)
}
