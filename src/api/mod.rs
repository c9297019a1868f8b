//! REST API surface, mounted under `/api`.

pub mod admin_routes;
pub mod blog_routes;
pub mod category_routes;
pub mod content_routes;
pub mod image_routes;
pub mod page_routes;
pub mod section_routes;

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeFile,
    trace::TraceLayer,
};

use crate::clients::{ImageApiClient, TextApiClient};
use crate::config::AppConfig;
use crate::sitemap::SitemapHandle;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
    pub sitemap: SitemapHandle,
    pub image_client: ImageApiClient,
    pub text_client: TextApiClient,
}

/// Assemble the full router: resource routes, the public sitemap artifact,
/// health check, and middleware.
pub fn create_router(state: AppState) -> Router {
    let sitemap_file = ServeFile::new(state.config.sitemap_path.clone());

    Router::new()
        .merge(category_routes::create_category_router(state.clone()))
        .merge(section_routes::create_section_router(state.clone()))
        .merge(content_routes::create_content_router(state.clone()))
        .merge(page_routes::create_page_router(state.clone()))
        .merge(blog_routes::create_blog_router(state.clone()))
        .merge(image_routes::create_image_router(state.clone()))
        .merge(admin_routes::create_admin_router(state))
        .route_service("/sitemap.xml", sitemap_file)
        .route("/api/health", get(health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "airbrush-backend",
    }))
}
