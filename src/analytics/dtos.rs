use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::entities::{AnalyticsKind, DailyCount};

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, ToSchema)]
pub struct TopArticle {
    pub id: i64,
    pub title: String,
    pub clicks: i32,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub top_articles: Vec<TopArticle>,
    pub today_clicks: i64,
    pub today_views: i64,
    pub total_articles: i64,
    pub published_articles: i64,
    #[serde(rename = "viewsLast7Days")]
    pub views_last_7_days: Vec<DailyCount>,
    #[serde(rename = "clicksLast7Days")]
    pub clicks_last_7_days: Vec<DailyCount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Pageview,
    Click,
}

impl From<TrackKind> for AnalyticsKind {
    fn from(kind: TrackKind) -> Self {
        match kind {
            TrackKind::Pageview => AnalyticsKind::PageView,
            TrackKind::Click => AnalyticsKind::Click,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    #[serde(rename = "type")]
    pub kind: TrackKind,
    pub article_id: Option<i64>,
}
