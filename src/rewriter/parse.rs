use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

use crate::entities::DEFAULT_CATEGORY;
use crate::rewriter::{RewriteError, RewrittenFields};

static OPENING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^```(?:json)?\s*").unwrap());
static CLOSING_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*```$").unwrap());

#[derive(Debug, Deserialize)]
struct RawRewrite {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

/// Remove a surrounding markdown code fence, if any.
pub fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let start = OPENING_FENCE.find(trimmed).map_or(0, |m| m.end());
    let rest = &trimmed[start..];
    let end = CLOSING_FENCE.find(rest).map_or(rest.len(), |m| m.start());
    rest[..end].trim()
}

/// Parse the model reply. Missing or blank fields fall back to the original
/// title/content and to the catch-all category.
pub fn parse_reply(
    reply: &str,
    original_title: &str,
    original_content: &str,
) -> Result<RewrittenFields, RewriteError> {
    let raw: RawRewrite = serde_json::from_str(strip_code_fence(reply))
        .map_err(|e| RewriteError::Format(e.to_string()))?;

    Ok(RewrittenFields {
        title: non_blank(raw.title).unwrap_or_else(|| original_title.to_string()),
        content: non_blank(raw.content).unwrap_or_else(|| original_content.to_string()),
        category: non_blank(raw.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
