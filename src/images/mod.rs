//! Stock photo search for article hero images.

pub mod client;
pub mod dtos;
pub mod handlers;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use utoipa::ToSchema;

pub use client::PexelsClient;

/// Words of the title used for the hero image query.
const QUERY_TITLE_WORDS: usize = 4;
pub const QUERY_QUALIFIER: &str = "sports";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImageResult {
    pub id: u64,
    pub url: String,
    pub thumb: String,
    pub small: String,
    pub alt: String,
    pub photographer: String,
}

#[derive(Error, Debug)]
pub enum ImageSearchError {
    #[error("image search request failed: {0}")]
    Request(String),

    #[error("image search answered {status}")]
    Http { status: reqwest::StatusCode },

    #[error("unexpected image search payload: {0}")]
    Decode(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageSearch: Send + Sync {
    /// Landscape photos for `query`, best match first.
    async fn search(
        &self,
        api_key: &str,
        query: &str,
        per_page: u8,
    ) -> Result<Vec<ImageResult>, ImageSearchError>;
}

/// `"<first words of title> sports"`.
pub fn hero_query(title: &str) -> String {
    let words: Vec<&str> = title.split_whitespace().take(QUERY_TITLE_WORDS).collect();
    if words.is_empty() {
        QUERY_QUALIFIER.to_string()
    } else {
        format!("{} {}", words.join(" "), QUERY_QUALIFIER)
    }
}

/// Best hero image for `title`, or `None`. Never fails: a missing
/// credential, an upstream error and an empty result all yield `None`.
pub async fn resolve_hero_image(
    search: &dyn ImageSearch,
    api_key: Option<&str>,
    title: &str,
) -> Option<String> {
    let Some(api_key) = api_key.filter(|k| !k.trim().is_empty()) else {
        debug!("no image search credential configured");
        return None;
    };

    let query = hero_query(title);
    match search.search(api_key, &query, 1).await {
        Ok(results) => results
            .into_iter()
            .map(|image| image.url)
            .find(|url| !url.is_empty()),
        Err(e) => {
            warn!(error = %e, query = %query, "hero image search failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(url: &str) -> ImageResult {
        ImageResult {
            id: 1,
            url: url.to_string(),
            thumb: String::new(),
            small: String::new(),
            alt: String::new(),
            photographer: String::new(),
        }
    }

    #[test]
    fn query_uses_first_words_and_qualifier() {
        assert_eq!(
            hero_query("Flamengo vence o Palmeiras nos acréscimos"),
            "Flamengo vence o Palmeiras sports"
        );
        assert_eq!(hero_query("Lakers   vencem"), "Lakers vencem sports");
        assert_eq!(hero_query(""), "sports");
    }

    #[tokio::test]
    async fn first_result_wins() {
        let mut search = MockImageSearch::new();
        search
            .expect_search()
            .withf(|key, query, per_page| {
                key == "k" && query == "Lakers vencem sports" && *per_page == 1
            })
            .returning(|_, _, _| Ok(vec![image("https://img/1.jpg"), image("https://img/2.jpg")]));

        let url = resolve_hero_image(&search, Some("k"), "Lakers vencem").await;
        assert_eq!(url.as_deref(), Some("https://img/1.jpg"));
    }

    #[tokio::test]
    async fn missing_credential_skips_the_call() {
        let mut search = MockImageSearch::new();
        search.expect_search().never();

        assert_eq!(resolve_hero_image(&search, None, "T").await, None);
        assert_eq!(resolve_hero_image(&search, Some("  "), "T").await, None);
    }

    #[tokio::test]
    async fn failures_and_empty_results_are_soft() {
        let mut search = MockImageSearch::new();
        search
            .expect_search()
            .times(1)
            .returning(|_, _, _| Err(ImageSearchError::Request("timeout".into())));
        assert_eq!(resolve_hero_image(&search, Some("k"), "T").await, None);

        let mut search = MockImageSearch::new();
        search.expect_search().returning(|_, _, _| Ok(vec![]));
        assert_eq!(resolve_hero_image(&search, Some("k"), "T").await, None);
    }
}
