use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Byline used for everything the newsroom publishes without a named author.
pub const HOUSE_AUTHOR: &str = "Redação Acréscimos";

/// Catch-all category.
pub const DEFAULT_CATEGORY: &str = "Geral";

/// The editorial categories articles are filed under.
pub const CATEGORIES: [&str; 11] = [
    "Brasileirão",
    "Futebol Internacional",
    "Copa do Brasil",
    "Libertadores",
    "Basquete",
    "Fórmula 1",
    "Tênis",
    "Vôlei",
    "Mercado da Bola",
    "Opinião",
    "Geral",
];

pub fn is_known_category(category: &str) -> bool {
    CATEGORIES.contains(&category)
}

/// --- Tables ---

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub image: String,
    pub category: String,
    pub author: String,
    pub published: bool,
    pub featured: bool,
    pub clicks: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to insert an article; the store assigns the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct NewArticle {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub image: String,
    pub category: String,
    pub author: String,
    pub published: bool,
    pub featured: bool,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleChanges {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub published: Option<bool>,
    pub featured: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    pub published: Option<bool>,
    pub category: Option<String>,
    pub featured: Option<bool>,
}

#[derive(Debug, Clone, FromRow)]
pub struct Setting {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    pub pw_hash: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsKind {
    PageView,
    Click,
}

impl AnalyticsKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PageView => "pageview",
            Self::Click => "click",
        }
    }
}

/// One day of a counter series.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: i64,
}
