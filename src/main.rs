use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use airbrush_backend::api::{create_router, AppState};
use airbrush_backend::clients::{ImageApiClient, TextApiClient};
use airbrush_backend::config::AppConfig;
use airbrush_backend::sitemap::{self, SitemapWorker};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "airbrush_backend=info,tower_http=debug".to_string()),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();
    let config = Arc::new(AppConfig::from_env());

    // Database connection
    info!("Connecting to database: {}", config.database_url);
    let pool = sqlx::PgPool::connect(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Make sure /sitemap.xml serves something from the first request, then
    // rebuild from current data. This runs before the worker is spawned, so
    // it is still the only writer at this point. A failed initial rebuild is
    // not fatal; the worker repairs the artifact on its next job.
    if sitemap::artifact::ensure_exists(&config.sitemap_path, &config.site_url)? {
        info!("created placeholder sitemap artifact");
    }
    if let Err(e) = sitemap::regenerate(&pool, &config).await {
        warn!(error = %e, "initial sitemap regeneration failed");
    }

    // Single-writer sitemap worker
    let (sitemap_handle, jobs) = sitemap::queue(64);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let worker = SitemapWorker::new(pool.clone(), config.clone());
    let worker_task = tokio::spawn(worker.run(jobs, shutdown_rx));

    let state = AppState {
        pool,
        config: config.clone(),
        sitemap: sitemap_handle,
        image_client: ImageApiClient::new(config.image_api_url.clone()),
        text_client: TextApiClient::new(config.text_api_url.clone(), config.text_api_key.clone()),
    };

    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Stop the worker once the server has drained.
    let _ = shutdown_tx.send(true);
    let _ = worker_task.await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to install ctrl-c handler");
    }
    info!("shutdown signal received");
}
