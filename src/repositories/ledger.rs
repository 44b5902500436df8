//! Source URLs already imported or explicitly skipped.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::extractor::normalize_url;

/// Persisted, append-only set of consumed source URLs. Implementations
/// normalize URLs on both read and write, and `mark_consumed` is idempotent.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DedupLedger: Send + Sync {
    async fn is_consumed(&self, url: &str) -> Result<bool>;
    async fn mark_consumed(&self, url: &str) -> Result<()>;
    async fn consumed_count(&self) -> Result<i64>;
}

#[derive(Clone)]
pub struct PgDedupLedger {
    pool: PgPool,
}

impl PgDedupLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DedupLedger for PgDedupLedger {
    async fn is_consumed(&self, url: &str) -> Result<bool> {
        let consumed: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM scraped_urls WHERE url = $1)")
                .bind(normalize_url(url))
                .fetch_one(&self.pool)
                .await?;
        Ok(consumed)
    }

    async fn mark_consumed(&self, url: &str) -> Result<()> {
        // Insert-if-absent.
        sqlx::query("INSERT INTO scraped_urls (url) VALUES ($1) ON CONFLICT (url) DO NOTHING")
            .bind(normalize_url(url))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn consumed_count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM scraped_urls")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
