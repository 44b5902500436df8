use std::fs;

use crate::extractor::{ExtractionError, extract_article};

const SOURCE: &str = "https://ge.globo.com/futebol/noticia/2026/10/fla-pal.ghtml";

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture")
}

#[test]
fn test_extract_with_open_graph_and_content_paragraphs() {
    let record = extract_article(&fixture("article.html"), SOURCE).unwrap();

    assert_eq!(
        record.title,
        "Flamengo & Palmeiras: virada nos acréscimos decide clássico"
    );
    assert_eq!(record.image, "https://s2.glbimg.com/fla-pal.jpg");
    assert_eq!(
        record.content,
        "O Flamengo venceu o Palmeiras por 2 a 1 neste domingo.\n\n\
         O gol da vitória saiu aos 47 minutos do segundo tempo, com Pedro."
    );
    assert_eq!(record.source_url, SOURCE);
}

#[test]
fn test_fallback_to_heading_and_generic_paragraphs() {
    let record = extract_article(&fixture("fallback.html"), SOURCE).unwrap();

    assert_eq!(record.title, "Lakers vencem mais uma com show de LeBron");
    assert_eq!(record.image, "");

    let paragraphs: Vec<&str> = record.content.split("\n\n").collect();
    assert_eq!(paragraphs.len(), 10);
    assert!(paragraphs[0].starts_with("LeBron James"));
    assert!(paragraphs.iter().all(|p| p.chars().count() > 50));
    assert!(!record.content.contains("Curta demais"));
    assert!(!record.content.contains("Parágrafo 11"));
}

#[test]
fn test_blank_og_title_falls_back_to_heading() {
    let html = r#"<html><head><meta property="og:title" content="  "></head>
        <body><h1>Título <span>real</span></h1>
        <p class="content-text">Corpo do texto.</p></body></html>"#;

    let record = extract_article(html, SOURCE).unwrap();
    assert_eq!(record.title, "Título real");
    assert_eq!(record.content, "Corpo do texto.");
}

#[test]
fn test_missing_title_is_an_error() {
    let html = r#"<html><body><p class="content-text">Corpo sem título.</p></body></html>"#;
    assert_eq!(
        extract_article(html, SOURCE),
        Err(ExtractionError::MissingTitle)
    );
}

#[test]
fn test_missing_content_is_an_error() {
    let html = r#"<html><head><meta property="og:title" content="Só título"></head>
        <body><p>Curto.</p></body></html>"#;
    assert_eq!(
        extract_article(html, SOURCE),
        Err(ExtractionError::MissingContent)
    );
}

#[test]
fn test_image_has_no_inline_fallback() {
    let html = r#"<html><head><meta name="og:title" content="Sem imagem"></head>
        <body><img src="/inline.jpg"><p class="content-text">Texto.</p></body></html>"#;
    let record = extract_article(html, SOURCE).unwrap();
    assert!(record.image.is_empty());
}

#[test]
fn test_malformed_html() {
    let html = "<html><head><title>Broken</title><body><h1>Quebrado<p class=\"content-text\">Tags abertas";
    // Should handle malformed HTML gracefully
    if let Ok(record) = extract_article(html, SOURCE) {
        assert!(record.content.contains("Tags abertas"));
    }
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use crate::extractor::extract_candidate_urls;
    use proptest::prelude::*;
    use url::Url;

    proptest! {
        #[test]
        fn test_extract_never_panics(html in ".*") {
            let _ = extract_article(&html, SOURCE);
            let base = Url::parse("https://ge.globo.com/").unwrap();
            let _ = extract_candidate_urls(&html, &base);
        }

        #[test]
        fn test_candidates_are_unique(slugs in proptest::collection::vec("[a-z]{1,8}", 0..20)) {
            let html: String = slugs
                .iter()
                .map(|s| format!(r#"<a href="/futebol/noticia/{s}.ghtml?x=1">{s}</a>"#))
                .collect();
            let base = Url::parse("https://ge.globo.com/").unwrap();
            let urls = extract_candidate_urls(&html, &base);
            let mut distinct = slugs.clone();
            distinct.sort();
            distinct.dedup();
            prop_assert_eq!(urls.len(), distinct.len());
        }
    }
}
