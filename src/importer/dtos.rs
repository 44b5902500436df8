use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{entities::Article, extractor::ScrapedRecord};

/// What the operator reviews before committing or skipping. Nothing about it
/// is kept server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
    pub original: ScrapedRecord,
    pub rewritten: RewrittenDraft,
    /// Candidate links found on the listing page.
    pub articles_found: usize,
    /// Size of the ledger when the preview was built.
    pub already_scraped: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RewrittenDraft {
    pub title: String,
    pub content: String,
    pub image: String,
    pub category: String,
}

/// The operator's decision on a preview, echoing back the (possibly edited)
/// rewritten fields.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub original_url: Option<String>,
    #[serde(default)]
    pub skip: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResolveOutcome {
    Skipped,
    Created(Article),
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SkipResponse {
    pub success: bool,
    pub skipped: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_wire_shape() {
        let preview = Preview {
            original: ScrapedRecord {
                title: "t".into(),
                content: "c".into(),
                image: String::new(),
                source_url: "https://ge.globo.com/a/noticia/x.ghtml".into(),
            },
            rewritten: RewrittenDraft {
                title: "T".into(),
                content: "C".into(),
                image: "https://img/1.jpg".into(),
                category: "Geral".into(),
            },
            articles_found: 3,
            already_scraped: 1,
        };
        let json = serde_json::to_value(&preview).unwrap();
        assert_eq!(json["original"]["url"], "https://ge.globo.com/a/noticia/x.ghtml");
        assert_eq!(json["rewritten"]["category"], "Geral");
        assert_eq!(json["articlesFound"], 3);
        assert_eq!(json["alreadyScraped"], 1);
    }

    #[test]
    fn resolve_request_defaults() {
        let req: ResolveRequest =
            serde_json::from_str(r#"{"originalUrl":"https://x/noticia/a.ghtml"}"#).unwrap();
        assert!(!req.skip);
        assert!(req.title.is_none());
        assert_eq!(req.original_url.as_deref(), Some("https://x/noticia/a.ghtml"));
    }
}
