//! Field extraction from a single source article page.
//!
//! Structured metadata first (`og:title`, `og:image`), structural fallback
//! second (first `<h1>`, generic paragraphs).

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use thiserror::Error;

use crate::extractor::model::{ScrapedRecord, collapse_whitespace};

static OG_TITLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[property="og:title"], meta[name="og:title"]"#).unwrap()
});
static OG_IMAGE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[property="og:image"], meta[name="og:image"]"#).unwrap()
});
static HEADING: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());
static CONTENT_PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"p[class*="content-text"]"#).unwrap());
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());

/// Generic paragraphs at or below this many characters are treated as chrome
/// (captions, bylines, share prompts) by the fallback.
const FALLBACK_MIN_PARAGRAPH_CHARS: usize = 50;
const FALLBACK_MAX_PARAGRAPHS: usize = 10;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("no title found")]
    MissingTitle,

    #[error("no body text found")]
    MissingContent,
}

pub fn extract_article(html: &str, source_url: &str) -> Result<ScrapedRecord, ExtractionError> {
    let document = Html::parse_document(html);

    let title = meta_content(&document, &OG_TITLE)
        .or_else(|| first_heading(&document))
        .ok_or(ExtractionError::MissingTitle)?;

    let image = meta_content(&document, &OG_IMAGE).unwrap_or_default();

    let mut content = join_paragraphs(document.select(&CONTENT_PARAGRAPH).map(element_text));
    if content.is_empty() {
        content = join_paragraphs(
            document
                .select(&PARAGRAPH)
                .map(element_text)
                .filter(|text| text.chars().count() > FALLBACK_MIN_PARAGRAPH_CHARS)
                .take(FALLBACK_MAX_PARAGRAPHS),
        );
    }
    if content.is_empty() {
        return Err(ExtractionError::MissingContent);
    }

    Ok(ScrapedRecord {
        title,
        content,
        image,
        source_url: source_url.to_string(),
    })
}

/// First non-blank `content` attribute. The parser has already decoded
/// entities.
fn meta_content(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .filter_map(|element| element.value().attr("content"))
        .map(collapse_whitespace)
        .find(|value| !value.is_empty())
}

fn first_heading(document: &Html) -> Option<String> {
    document
        .select(&HEADING)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
}

/// Text content with markup dropped and whitespace collapsed.
fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

fn join_paragraphs(paragraphs: impl Iterator<Item = String>) -> String {
    paragraphs
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}
