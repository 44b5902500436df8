use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::ToSchema;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Title, body and hero image recovered from one source article page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScrapedRecord {
    pub title: String,
    /// Paragraphs separated by a blank line.
    pub content: String,
    /// `og:image` URL, empty when the page has none.
    pub image: String,
    #[serde(rename = "url")]
    pub source_url: String,
}

/// Collapse every whitespace run (including newlines) to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}
