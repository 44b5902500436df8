use crate::fetcher::{errors::FetchError, pipeline::process_response, types::PageResponse};
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{debug, instrument};

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

// The source site serves a reduced page (or nothing) to obvious bots.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";
const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "pt-BR,pt;q=0.9,en;q=0.8";

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::ACCEPT,
        reqwest::header::HeaderValue::from_static(ACCEPT),
    );
    headers.insert(
        reqwest::header::ACCEPT_LANGUAGE,
        reqwest::header::HeaderValue::from_static(ACCEPT_LANGUAGE),
    );

    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .timeout(FETCH_TIMEOUT)
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .default_headers(headers)
        .build()
        .expect("Failed to build HTTP client")
});

/// Join `path` onto an API base treated as a directory, so
/// `https://api.x.ai/v1` + `chat/completions` keeps the version segment.
pub fn api_endpoint(base: &url::Url, path: &str) -> Result<url::Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        base.set_path(&format!("{}/", base.path()));
    }
    base.join(path)
}

/// Fetch an HTML page with browser-like headers. One attempt, no retries.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_page(url: &str) -> Result<PageResponse, FetchError> {
    let parsed_url = url::Url::parse(url)?;

    let response = HTTP_CLIENT
        .get(parsed_url)
        .send()
        .await
        .map_err(FetchError::from_reqwest_error)?;

    // Check content length before downloading
    if let Some(content_length) = response.content_length()
        && content_length > MAX_BODY_SIZE
    {
        return Err(FetchError::BodyTooLarge(content_length));
    }

    let final_url = response.url().clone();
    let status = response.status();

    if !status.is_success() {
        return Err(FetchError::Http { status });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or("text/html")
        .to_string();

    if !content_type.contains("text/html") && !content_type.contains("application/xhtml") {
        return Err(FetchError::UnsupportedContentType(content_type));
    }

    let body_bytes = response
        .bytes()
        .await
        .map_err(|e| FetchError::Io(e.to_string()))?;

    // Check body size after download (in case Content-Length was missing)
    if body_bytes.len() as u64 > MAX_BODY_SIZE {
        return Err(FetchError::BodyTooLarge(body_bytes.len() as u64));
    }

    debug!(status = %status, bytes = body_bytes.len(), "page fetched");
    process_response(final_url, status, &body_bytes, &content_type)
}
