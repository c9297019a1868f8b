//! REST routes for blog posts.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AppState;
use crate::database::BlogRepository;
use crate::error::ApiResult;
use crate::models::{BlogPost, UpdateBlogPost};

#[derive(Debug, Deserialize)]
pub struct BlogListQuery {
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BlogListResponse {
    pub success: bool,
    pub data: Vec<BlogPost>,
}

/// GET /api/blog?search=
async fn list_blog_posts(
    State(state): State<AppState>,
    Query(query): Query<BlogListQuery>,
) -> ApiResult<Json<BlogListResponse>> {
    let posts = BlogRepository::new(state.pool.clone())
        .list(query.search.as_deref())
        .await?;
    Ok(Json(BlogListResponse {
        success: true,
        data: posts,
    }))
}

/// GET /api/blog/:url
async fn get_blog_post_by_url(
    State(state): State<AppState>,
    Path(url): Path<String>,
) -> ApiResult<Json<BlogPost>> {
    let post = BlogRepository::new(state.pool.clone())
        .get_by_url(&url)
        .await?;
    Ok(Json(post))
}

/// PUT /api/blog/:id
async fn update_blog_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBlogPost>,
) -> ApiResult<Json<BlogPost>> {
    let post = BlogRepository::new(state.pool.clone())
        .update(id, payload)
        .await?;
    Ok(Json(post))
}

pub fn create_blog_router(state: AppState) -> Router {
    Router::new()
        .route("/api/blog", get(list_blog_posts))
        .route("/api/blog/:url", get(get_blog_post_by_url).put(update_blog_post))
        .with_state(state)
}
