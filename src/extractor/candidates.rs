//! Discovery of article links on the source listing page.

use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Url;

static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// Path marker and suffix shared by every article on the source site.
const ARTICLE_PATH_MARKER: &str = "/noticia/";
const ARTICLE_PATH_SUFFIX: &str = ".ghtml";

/// Canonical form used for comparisons and for the ledger: query string and
/// fragment removed.
pub fn normalize_url(raw: &str) -> String {
    let raw = raw.trim();
    match Url::parse(raw) {
        Ok(mut url) => {
            url.set_query(None);
            url.set_fragment(None);
            url.to_string()
        }
        Err(_) => {
            let without_fragment = raw.split('#').next().unwrap_or(raw);
            without_fragment
                .split('?')
                .next()
                .unwrap_or(without_fragment)
                .to_string()
        }
    }
}

/// Article links found on `listing_html`, normalized, first-seen order, no
/// duplicates. Relative links are resolved against `base`; links to other
/// hosts are ignored. An empty result is not an error.
pub fn extract_candidate_urls(listing_html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(listing_html);
    let mut seen = HashSet::new();
    let mut urls = Vec::new();

    for anchor in document.select(&ANCHOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Ok(resolved) = base.join(href.trim()) else {
            continue;
        };
        if !is_article_url(&resolved, base) {
            continue;
        }

        let normalized = normalize_url(resolved.as_str());
        if seen.insert(normalized.clone()) {
            urls.push(normalized);
        }
    }

    urls
}

fn is_article_url(url: &Url, base: &Url) -> bool {
    url.scheme() == base.scheme()
        && url.host_str() == base.host_str()
        && url.port_or_known_default() == base.port_or_known_default()
        && url.path().contains(ARTICLE_PATH_MARKER)
        && url.path().ends_with(ARTICLE_PATH_SUFFIX)
}
