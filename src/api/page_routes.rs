//! REST routes for static pages, including the bulk generated-page flow.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use super::AppState;
use crate::database::PageRepository;
use crate::error::{ApiError, ApiResult};
use crate::models::page::slugify;
use crate::models::{NewPage, Page};

#[derive(Debug, Deserialize)]
pub struct GeneratePagesRequest {
    pub keywords: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct GeneratePagesResponse {
    pub message: String,
    pub urls: Vec<String>,
}

/// GET /api/pages
async fn list_pages(State(state): State<AppState>) -> ApiResult<Json<Vec<Page>>> {
    let pages = PageRepository::new(state.pool.clone()).list_all().await?;
    Ok(Json(pages))
}

/// GET /api/pages/:id
async fn get_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Page>> {
    let page = PageRepository::new(state.pool.clone()).get_by_id(id).await?;
    Ok(Json(page))
}

/// POST /api/pages/generate
///
/// For each keyword: slugify it, generate a title and body through the text
/// API, store a page document, and queue a sitemap append for the new slug.
/// Pages append incrementally instead of triggering a full rebuild.
async fn generate_pages(
    State(state): State<AppState>,
    Json(payload): Json<GeneratePagesRequest>,
) -> ApiResult<Json<GeneratePagesResponse>> {
    if payload.keywords.is_empty() {
        return Err(ApiError::Validation("Invalid keywords input.".to_string()));
    }

    let repository = PageRepository::new(state.pool.clone());
    let mut urls = Vec::with_capacity(payload.keywords.len());

    for keyword in &payload.keywords {
        let slug = slugify(keyword);
        if slug.is_empty() {
            return Err(ApiError::Validation(format!(
                "keyword {:?} produces an empty slug",
                keyword
            )));
        }

        let title = state
            .text_client
            .generate(&format!(
                "Generate an appropriate title for the web article having keywords: {}",
                keyword
            ))
            .await?;
        let body = state
            .text_client
            .generate(&format!(
                "Generate a short-paragraphed content of about 4-6 lines based on keywords: {}",
                keyword
            ))
            .await?;

        repository
            .create(NewPage {
                slug: slug.clone(),
                attributes: json!({
                    "keyword": keyword,
                    "title": title,
                    "content": body,
                }),
            })
            .await?;

        state.sitemap.request_append(slug.clone());
        urls.push(format!("/{}", slug));
    }

    Ok(Json(GeneratePagesResponse {
        message: "Pages generated successfully!".to_string(),
        urls,
    }))
}

pub fn create_page_router(state: AppState) -> Router {
    Router::new()
        .route("/api/pages", get(list_pages))
        .route("/api/pages/generate", post(generate_pages))
        .route("/api/pages/:id", get(get_page))
        .with_state(state)
}
