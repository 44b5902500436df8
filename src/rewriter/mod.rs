//! Language-model rewrite of a scraped article.

pub mod client;
pub mod parse;
pub mod prompt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use client::ChatCompletionRewriter;

/// Rewritten title, body and category, with gaps already filled from the
/// original article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewrittenFields {
    pub title: String,
    pub content: String,
    pub category: String,
}

#[derive(Error, Debug)]
pub enum RewriteError {
    #[error("rewrite request failed: {0}")]
    Request(String),

    #[error("rewrite service answered {status}")]
    Http { status: reqwest::StatusCode },

    #[error("rewrite reply is not the expected JSON object: {0}")]
    Format(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Rewriter: Send + Sync {
    /// Rewrite `title`/`content` using the service credential `api_key`.
    async fn rewrite(
        &self,
        api_key: &str,
        title: &str,
        content: &str,
    ) -> Result<RewrittenFields, RewriteError>;
}
