use anyhow::Result;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use crate::analytics::dtos::{AnalyticsSummary, TopArticle};
use crate::entities::{AnalyticsKind, DailyCount};

const TOP_ARTICLES: i64 = 10;
const RECENT_DAYS: i32 = 7;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsRepositoryTrait: Send + Sync {
    async fn track_page_view(&self) -> Result<()>;
    /// Returns `false` when the article does not exist; nothing is recorded.
    async fn track_click(&self, article_id: i64) -> Result<bool>;
    async fn summary(&self) -> Result<AnalyticsSummary>;
}

#[derive(Clone)]
pub struct AnalyticsRepository {
    pool: PgPool,
}

impl AnalyticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn daily(&self, kind: AnalyticsKind) -> Result<Vec<DailyCount>> {
        let rows = sqlx::query_as::<_, DailyCount>(
            r#"
            SELECT day AS date, SUM(count)::BIGINT AS count
            FROM analytics
            WHERE kind = $1 AND day > CURRENT_DATE - $2::INT
            GROUP BY day
            ORDER BY day
            "#,
        )
        .bind(kind.as_str())
        .bind(RECENT_DAYS)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn today(&self, kind: AnalyticsKind) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(count), 0)::BIGINT FROM analytics WHERE kind = $1 AND day = CURRENT_DATE",
        )
        .bind(kind.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}

/// Bump today's counter for (`kind`, `article_id`), creating the row on the
/// first hit of the day.
async fn bump_counter(
    tx: &mut Transaction<'_, Postgres>,
    kind: AnalyticsKind,
    article_id: Option<i64>,
) -> Result<()> {
    let updated = sqlx::query(
        r#"
        UPDATE analytics
        SET count = count + 1
        WHERE kind = $1 AND article_id IS NOT DISTINCT FROM $2 AND day = CURRENT_DATE
        "#,
    )
    .bind(kind.as_str())
    .bind(article_id)
    .execute(&mut **tx)
    .await?;

    if updated.rows_affected() == 0 {
        sqlx::query("INSERT INTO analytics (kind, article_id) VALUES ($1, $2)")
            .bind(kind.as_str())
            .bind(article_id)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

#[async_trait]
impl AnalyticsRepositoryTrait for AnalyticsRepository {
    async fn track_page_view(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        bump_counter(&mut tx, AnalyticsKind::PageView, None).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn track_click(&self, article_id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;
        let bumped = sqlx::query("UPDATE articles SET clicks = clicks + 1 WHERE id = $1")
            .bind(article_id)
            .execute(&mut *tx)
            .await?;
        if bumped.rows_affected() == 0 {
            return Ok(false);
        }
        bump_counter(&mut tx, AnalyticsKind::Click, Some(article_id)).await?;
        tx.commit().await?;
        Ok(true)
    }

    async fn summary(&self) -> Result<AnalyticsSummary> {
        let top_articles = sqlx::query_as::<_, TopArticle>(
            "SELECT id, title, clicks, category FROM articles ORDER BY clicks DESC, id DESC LIMIT $1",
        )
        .bind(TOP_ARTICLES)
        .fetch_all(&self.pool)
        .await?;

        let (total_articles, published_articles): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE published) FROM articles",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(AnalyticsSummary {
            top_articles,
            today_clicks: self.today(AnalyticsKind::Click).await?,
            today_views: self.today(AnalyticsKind::PageView).await?,
            total_articles,
            published_articles,
            views_last_7_days: self.daily(AnalyticsKind::PageView).await?,
            clicks_last_7_days: self.daily(AnalyticsKind::Click).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::setup_test_db;

    #[tokio::test]
    async fn test_page_views_accumulate_per_day() {
        let Some(pool) = setup_test_db().await else {
            return; // Skip test if database not available
        };
        let repo = AnalyticsRepository::new(pool);

        let before = repo.summary().await.unwrap().today_views;
        repo.track_page_view().await.unwrap();
        repo.track_page_view().await.unwrap();
        let after = repo.summary().await.unwrap();

        assert_eq!(after.today_views, before + 2);
        assert!(after.views_last_7_days.iter().any(|d| d.count >= 2));
    }

    #[tokio::test]
    async fn test_click_on_missing_article_is_ignored() {
        let Some(pool) = setup_test_db().await else {
            return; // Skip test if database not available
        };
        let repo = AnalyticsRepository::new(pool);
        assert!(!repo.track_click(i64::MAX).await.unwrap());
    }
}
