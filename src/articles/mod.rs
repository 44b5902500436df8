pub mod dtos;
pub mod handlers;
pub mod slug;

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Longest accepted title, in characters.
pub const MAX_TITLE_LEN: usize = 300;

static MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<\s*/?\s*[A-Za-z][^<>]*>|<!--").unwrap());

/// Rejected article input. Display strings are shown to the editor.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleInputError {
    #[error("Título e conteúdo são obrigatórios")]
    MissingFields,

    #[error("Título muito longo")]
    TitleTooLong,
}

/// Trimmed title, or why it cannot be stored.
pub fn check_title(title: &str) -> Result<&str, ArticleInputError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ArticleInputError::MissingFields);
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ArticleInputError::TitleTooLong);
    }
    Ok(title)
}

/// Strip scripts, event handlers and other unsafe markup from article HTML.
///
/// Bodies without any tags are plain text (paragraphs split by blank lines)
/// and are stored verbatim.
pub fn sanitize_content(content: &str) -> String {
    if MARKUP.is_match(content) {
        ammonia::clean(content)
    } else {
        content.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_formatting_drops_scripts() {
        let html = r#"<p onclick="x()">Gol de <strong>placa</strong></p><script>alert(1)</script>"#;
        assert_eq!(sanitize_content(html), "<p>Gol de <strong>placa</strong></p>");
    }

    #[test]
    fn plain_text_survives() {
        let text = "Primeiro parágrafo.\n\nSegundo parágrafo.";
        assert_eq!(sanitize_content(text), text);
    }

    #[test]
    fn plain_text_is_not_entity_escaped() {
        let text = "Fla & Flu empatam: placar 1 < 2 no agregado.\n\nJogo > expectativa.";
        assert_eq!(sanitize_content(text), text);
    }

    #[test]
    fn lone_tag_triggers_cleaning() {
        let text = "Fla & Flu <img src=x onerror=alert(1)>";
        let cleaned = sanitize_content(text);
        assert!(!cleaned.contains("onerror"));
        assert!(cleaned.contains("&amp;"));
    }

    #[test]
    fn titles_are_trimmed_and_bounded() {
        assert_eq!(check_title("  Gol no fim  "), Ok("Gol no fim"));
        assert_eq!(check_title("   "), Err(ArticleInputError::MissingFields));
        let long = "a".repeat(MAX_TITLE_LEN + 1);
        assert_eq!(check_title(&long), Err(ArticleInputError::TitleTooLong));
        assert!(check_title(&"é".repeat(MAX_TITLE_LEN)).is_ok());
    }
}
