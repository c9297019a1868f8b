//! SitemapWorker — dedicated single-writer task for the sitemap artifact.
//!
//! Mutation handlers never touch the file; they queue a job and move on. The
//! worker drains the queue, runs the daily scheduled rebuild, and serializes
//! every artifact write, so an append can never interleave with a full
//! regeneration. Job failures are logged and swallowed: derived state must
//! never fail the mutation that triggered it.

use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;
use tokio::sync::{mpsc, watch};

use super::{artifact, builder::SitemapEntry, regenerate, schedule, SitemapJob};
use crate::config::AppConfig;

pub struct SitemapWorker {
    pool: PgPool,
    config: Arc<AppConfig>,
}

impl SitemapWorker {
    pub fn new(pool: PgPool, config: Arc<AppConfig>) -> Self {
        Self { pool, config }
    }

    /// Run until the job queue closes or the shutdown signal flips.
    pub async fn run(
        self,
        mut jobs: mpsc::Receiver<SitemapJob>,
        mut shutdown_rx: watch::Receiver<bool>,
    ) {
        tracing::info!("SitemapWorker started");

        loop {
            if *shutdown_rx.borrow() {
                break;
            }

            let wait = schedule::until_next_run(
                Utc::now(),
                self.config.sitemap_refresh_hour,
                self.config.sitemap_utc_offset_hours,
            );

            tokio::select! {
                job = jobs.recv() => match job {
                    Some(job) => self.handle(job).await,
                    None => break,
                },
                _ = tokio::time::sleep(wait) => {
                    tracing::info!("running scheduled sitemap rebuild");
                    self.handle(SitemapJob::Regenerate).await;
                }
                _ = shutdown_rx.changed() => break,
            }
        }

        tracing::info!("SitemapWorker stopped");
    }

    async fn handle(&self, job: SitemapJob) {
        match job {
            SitemapJob::Regenerate => {
                if let Err(e) = regenerate(&self.pool, &self.config).await {
                    tracing::warn!(error = %e, "sitemap regeneration failed");
                }
            }
            SitemapJob::RegenerateWithReply { reply } => {
                let result = regenerate(&self.pool, &self.config).await;
                if let Err(e) = &result {
                    tracing::warn!(error = %e, "sitemap regeneration failed");
                }
                // A dropped receiver means the caller gave up waiting.
                let _ = reply.send(result);
            }
            SitemapJob::AppendPage { slug } => {
                let entry = SitemapEntry::page(&self.config.site_url, &slug, Utc::now());
                match artifact::append(&self.config.sitemap_path, &entry) {
                    Ok(true) => {
                        tracing::info!(slug = %slug, "appended page to sitemap");
                    }
                    Ok(false) => {
                        // Malformed artifact: fall back to the self-healing path.
                        tracing::warn!(slug = %slug, "sitemap missing closing tag, rebuilding");
                        if let Err(e) = regenerate(&self.pool, &self.config).await {
                            tracing::warn!(error = %e, "sitemap rebuild after failed append");
                        }
                    }
                    Err(e) => {
                        tracing::warn!(slug = %slug, error = %e, "sitemap append failed");
                    }
                }
            }
        }
    }
}
