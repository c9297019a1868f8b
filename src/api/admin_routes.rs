//! Administrative routes.

use axum::{extract::State, response::Json, routing::get, Router};
use serde::Serialize;

use super::AppState;
use crate::error::ApiResult;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSitemapResponse {
    pub success: bool,
    pub message: String,
    pub categories: usize,
    pub pages: usize,
}

/// GET /api/admin/update-sitemap
///
/// Full rebuild, awaited. The job runs on the sitemap worker like every
/// other artifact write; the handler just waits for the outcome so operators
/// get confirmation the file on disk reflects current data.
async fn update_sitemap(State(state): State<AppState>) -> ApiResult<Json<UpdateSitemapResponse>> {
    let stats = state.sitemap.rebuild().await?;
    Ok(Json(UpdateSitemapResponse {
        success: true,
        message: "Sitemap updated successfully".to_string(),
        categories: stats.categories,
        pages: stats.pages,
    }))
}

pub fn create_admin_router(state: AppState) -> Router {
    Router::new()
        .route("/api/admin/update-sitemap", get(update_sitemap))
        .with_state(state)
}
