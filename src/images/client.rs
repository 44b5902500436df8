use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;
use url::Url;

use crate::fetcher::api_endpoint;
use crate::images::{ImageResult, ImageSearch, ImageSearchError};

pub const IMAGE_SEARCH_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    id: u64,
    src: PhotoSources,
    #[serde(default)]
    alt: Option<String>,
    #[serde(default)]
    photographer: String,
}

#[derive(Debug, Deserialize)]
struct PhotoSources {
    #[serde(default)]
    large: String,
    #[serde(default)]
    medium: String,
    #[serde(default)]
    small: String,
}

/// Pexels photo search (`GET {base}/search`).
#[derive(Debug, Clone)]
pub struct PexelsClient {
    client: Client,
    endpoint: Url,
}

impl PexelsClient {
    pub fn new(api_base: &Url) -> Result<Self, ImageSearchError> {
        let client = Client::builder()
            .timeout(IMAGE_SEARCH_TIMEOUT)
            .build()
            .map_err(|e| ImageSearchError::Request(e.to_string()))?;
        let endpoint =
            api_endpoint(api_base, "search").map_err(|e| ImageSearchError::Request(e.to_string()))?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl ImageSearch for PexelsClient {
    #[instrument(skip(self, api_key))]
    async fn search(
        &self,
        api_key: &str,
        query: &str,
        per_page: u8,
    ) -> Result<Vec<ImageResult>, ImageSearchError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(reqwest::header::AUTHORIZATION, api_key)
            .query(&[
                ("query", query),
                ("per_page", &per_page.to_string()),
                ("orientation", "landscape"),
            ])
            .send()
            .await
            .map_err(|e| ImageSearchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageSearchError::Http { status });
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| ImageSearchError::Decode(e.to_string()))?;

        Ok(body
            .photos
            .into_iter()
            .map(|photo| ImageResult {
                id: photo.id,
                url: photo.src.large,
                thumb: photo.src.medium,
                small: photo.src.small,
                alt: photo
                    .alt
                    .filter(|alt| !alt.is_empty())
                    .unwrap_or_else(|| query.to_string()),
                photographer: photo.photographer,
            })
            .collect())
    }
}
