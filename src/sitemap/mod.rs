//! Sitemap regeneration subsystem.
//!
//! The artifact is fully derivable from the category and page collections, so
//! overwrite-by-reconstruction is the default repair mechanism: a full rebuild
//! is self-healing against any prior corruption. Mutations never touch the
//! file themselves; they queue a job for a dedicated single-writer worker, so
//! appends cannot interleave with a full rebuild.

pub mod artifact;
pub mod builder;
pub mod schedule;
pub mod worker;

use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::{mpsc, oneshot};

use crate::config::AppConfig;
use crate::database::{CategoryRepository, PageRepository};
use crate::error::{ApiError, ApiResult};

pub use worker::SitemapWorker;

/// Queued artifact mutation.
#[derive(Debug)]
pub enum SitemapJob {
    /// Full rebuild from current collection state.
    Regenerate,
    /// Full rebuild with the outcome reported back to the caller. Used by the
    /// admin endpoint so even synchronous rebuilds stay on the single writer.
    RegenerateWithReply {
        reply: oneshot::Sender<ApiResult<RegenerationStats>>,
    },
    /// Fast path after bulk page generation: one `<url>` entry appended.
    AppendPage { slug: String },
}

/// Cheap cloneable handle mutation paths use to request artifact refreshes.
/// Sends are fire-and-forget: a full queue or stopped worker is logged and
/// swallowed, never surfaced to the triggering request.
#[derive(Clone)]
pub struct SitemapHandle {
    tx: mpsc::Sender<SitemapJob>,
}

impl SitemapHandle {
    pub fn request_refresh(&self) {
        if let Err(e) = self.tx.try_send(SitemapJob::Regenerate) {
            tracing::warn!(error = %e, "sitemap refresh dropped");
        }
    }

    pub fn request_append(&self, slug: String) {
        if let Err(e) = self.tx.try_send(SitemapJob::AppendPage { slug }) {
            tracing::warn!(error = %e, "sitemap append dropped");
        }
    }

    /// Full rebuild, awaited: the job goes through the worker queue like any
    /// other write, so it cannot interleave with an in-flight append.
    pub async fn rebuild(&self) -> ApiResult<RegenerationStats> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(SitemapJob::RegenerateWithReply { reply: reply_tx })
            .await
            .map_err(|_| worker_stopped())?;
        reply_rx.await.map_err(|_| worker_stopped())?
    }
}

fn worker_stopped() -> ApiError {
    ApiError::Io(std::io::Error::other("sitemap worker is not running"))
}

/// Create the job queue shared between mutation handlers and the worker.
pub fn queue(capacity: usize) -> (SitemapHandle, mpsc::Receiver<SitemapJob>) {
    let (tx, rx) = mpsc::channel(capacity);
    (SitemapHandle { tx }, rx)
}

/// Counts reported by a completed full regeneration.
#[derive(Debug, Clone, Copy)]
pub struct RegenerationStats {
    pub categories: usize,
    pub pages: usize,
}

/// Full rebuild: fetch all categories and pages, compose the document, and
/// atomically replace the artifact. Called by the worker for every rebuild
/// job, and once at startup before the worker is spawned.
pub async fn regenerate(pool: &PgPool, config: &Arc<AppConfig>) -> ApiResult<RegenerationStats> {
    let categories = CategoryRepository::new(pool.clone()).list_all().await?;
    let pages = PageRepository::new(pool.clone()).list_all().await?;

    let mut entries = Vec::with_capacity(1 + categories.len() + pages.len());
    entries.push(builder::SitemapEntry::root(&config.site_url));
    for category in &categories {
        let slug = if category.slug.is_empty() {
            category.id.to_string()
        } else {
            category.slug.clone()
        };
        entries.push(builder::SitemapEntry::category(
            &config.site_url,
            &slug,
            category.updated_at,
        ));
    }
    for page in &pages {
        let slug = if page.slug.is_empty() {
            page.id.to_string()
        } else {
            page.slug.clone()
        };
        entries.push(builder::SitemapEntry::page(
            &config.site_url,
            &slug,
            page.updated_at,
        ));
    }

    let xml = builder::build_sitemap(&entries);
    artifact::replace(&config.sitemap_path, &xml)?;

    let stats = RegenerationStats {
        categories: categories.len(),
        pages: pages.len(),
    };
    tracing::info!(
        categories = stats.categories,
        pages = stats.pages,
        "sitemap regenerated"
    );

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rebuild_goes_through_worker_queue() {
        let (handle, mut rx) = queue(4);

        let worker = tokio::spawn(async move {
            match rx.recv().await {
                Some(SitemapJob::RegenerateWithReply { reply }) => {
                    let _ = reply.send(Ok(RegenerationStats {
                        categories: 2,
                        pages: 3,
                    }));
                }
                other => panic!("expected a rebuild job, got {other:?}"),
            }
        });

        let stats = handle.rebuild().await.unwrap();
        assert_eq!(stats.categories, 2);
        assert_eq!(stats.pages, 3);
        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_rebuild_fails_when_worker_stopped() {
        let (handle, rx) = queue(1);
        drop(rx);
        assert!(handle.rebuild().await.is_err());
    }
}
