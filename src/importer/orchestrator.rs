use chrono::Utc;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::{
    articles::{
        ArticleInputError, check_title, sanitize_content,
        slug::{slugify, with_suffix},
    },
    entities::{Article, DEFAULT_CATEGORY, HOUSE_AUTHOR, NewArticle},
    extractor::{extract_article, extract_candidate_urls},
    fetcher::fetch_page,
    images::{ImageSearch, resolve_hero_image},
    importer::{
        dtos::{Preview, ResolveOutcome, ResolveRequest, RewrittenDraft},
        errors::ImportError,
    },
    repositories::{
        ArticleRepositoryTrait, DedupLedger, SettingsRepositoryTrait, StoreError,
        settings::{IMAGE_API_KEY, REWRITE_API_KEY},
    },
    rewriter::Rewriter,
};

/// Steps of `begin_import`, in order. Only used for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    FetchingListing,
    ExtractingCandidates,
    SelectingUnconsumed,
    FetchingArticle,
    ExtractingArticle,
    Rewriting,
    ResolvingImage,
    PreviewReady,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FetchingListing => "fetching_listing",
            Self::ExtractingCandidates => "extracting_candidates",
            Self::SelectingUnconsumed => "selecting_unconsumed",
            Self::FetchingArticle => "fetching_article",
            Self::ExtractingArticle => "extracting_article",
            Self::Rewriting => "rewriting",
            Self::ResolvingImage => "resolving_image",
            Self::PreviewReady => "preview_ready",
        };
        f.write_str(name)
    }
}

pub struct ImportPipeline {
    source_url: Url,
    articles: Arc<dyn ArticleRepositoryTrait + Send + Sync>,
    settings: Arc<dyn SettingsRepositoryTrait + Send + Sync>,
    ledger: Arc<dyn DedupLedger + Send + Sync>,
    rewriter: Arc<dyn Rewriter>,
    images: Arc<dyn ImageSearch + Send + Sync>,
}

impl ImportPipeline {
    pub fn new(
        source_url: Url,
        articles: Arc<dyn ArticleRepositoryTrait + Send + Sync>,
        settings: Arc<dyn SettingsRepositoryTrait + Send + Sync>,
        ledger: Arc<dyn DedupLedger + Send + Sync>,
        rewriter: Arc<dyn Rewriter>,
        images: Arc<dyn ImageSearch + Send + Sync>,
    ) -> Self {
        Self {
            source_url,
            articles,
            settings,
            ledger,
            rewriter,
            images,
        }
    }

    /// Find the first unconsumed article on the listing page, rewrite it and
    /// return the preview. Persists nothing.
    #[instrument(skip(self), fields(source = %self.source_url))]
    pub async fn begin_import(&self) -> Result<Preview, ImportError> {
        // Credentials are read per call so edits in settings apply immediately.
        let rewrite_key = self
            .credential(REWRITE_API_KEY)
            .await?
            .ok_or(ImportError::NoCredential)?;

        debug!(stage = %Stage::FetchingListing);
        let listing = fetch_page(self.source_url.as_str())
            .await
            .map_err(ImportError::ListingFetchFailed)?;

        debug!(stage = %Stage::ExtractingCandidates);
        let candidates = extract_candidate_urls(&listing.body_utf8, &listing.url_final);
        if candidates.is_empty() {
            return Err(ImportError::NoCandidates);
        }

        debug!(stage = %Stage::SelectingUnconsumed, candidates = candidates.len());
        let mut target = None;
        for candidate in &candidates {
            if !self.ledger.is_consumed(candidate).await? {
                target = Some(candidate.clone());
                break;
            }
        }
        let target = target.ok_or(ImportError::AllConsumed)?;
        let already_scraped = self.ledger.consumed_count().await?;

        debug!(stage = %Stage::FetchingArticle, url = %target);
        let page = fetch_page(&target)
            .await
            .map_err(ImportError::ArticleFetchFailed)?;

        debug!(stage = %Stage::ExtractingArticle);
        let original = extract_article(&page.body_utf8, &target)
            .map_err(ImportError::ArticleExtractionFailed)?;

        debug!(stage = %Stage::Rewriting);
        let rewritten = self
            .rewriter
            .rewrite(&rewrite_key, &original.title, &original.content)
            .await?;

        debug!(stage = %Stage::ResolvingImage);
        let image_key = match self.credential(IMAGE_API_KEY).await {
            Ok(key) => key,
            Err(e) => {
                warn!(error = %e, "could not read image search credential");
                None
            }
        };
        let image = resolve_hero_image(self.images.as_ref(), image_key.as_deref(), &rewritten.title)
            .await
            .unwrap_or_else(|| original.image.clone());

        info!(stage = %Stage::PreviewReady, url = %target, category = %rewritten.category, "import preview ready");
        Ok(Preview {
            rewritten: RewrittenDraft {
                title: rewritten.title,
                content: rewritten.content,
                image,
                category: rewritten.category,
            },
            original,
            articles_found: candidates.len(),
            already_scraped,
        })
    }

    /// Commit the previewed article as a draft, or skip it. Either way the
    /// source URL ends up consumed, but only once a commit has been stored.
    #[instrument(skip(self, request), fields(skip = request.skip, url = ?request.original_url))]
    pub async fn resolve_import(
        &self,
        request: ResolveRequest,
    ) -> Result<ResolveOutcome, ImportError> {
        let original_url = request
            .original_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(ImportError::MissingOriginalUrl)?;

        if request.skip {
            self.ledger.mark_consumed(original_url).await?;
            info!(url = %original_url, "source article skipped");
            return Ok(ResolveOutcome::Skipped);
        }

        let title = check_title(request.title.as_deref().unwrap_or_default())?.to_string();
        let content = present(request.content).ok_or(ArticleInputError::MissingFields)?;

        let draft = NewArticle {
            slug: slugify(&title),
            title,
            content: sanitize_content(&content),
            image: request.image.unwrap_or_default(),
            category: present(request.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            author: HOUSE_AUTHOR.to_string(),
            published: false,
            featured: false,
        };

        let article = self.create_with_retry(draft).await?;

        if let Err(e) = self.ledger.mark_consumed(original_url).await {
            // The draft exists; the source may be offered again later.
            error!(error = %e, url = %original_url, article_id = article.id, "draft stored but ledger write failed");
        }
        info!(article_id = article.id, slug = %article.slug, "draft article imported");
        Ok(ResolveOutcome::Created(article))
    }

    async fn create_with_retry(&self, draft: NewArticle) -> Result<Article, ImportError> {
        match self.articles.create(draft.clone()).await {
            Ok(article) => Ok(article),
            Err(StoreError::SlugConflict(slug)) => {
                let retry = with_suffix(&slug, Utc::now().timestamp_millis());
                debug!(%slug, %retry, "slug taken, retrying with suffix");
                self.articles
                    .create(NewArticle { slug: retry, ..draft })
                    .await
                    .map_err(ImportError::Storage)
            }
            Err(e) => Err(ImportError::Storage(e)),
        }
    }

    async fn credential(&self, key: &str) -> Result<Option<String>, ImportError> {
        let value = self.settings.get(key).await?;
        Ok(value.filter(|v| !v.trim().is_empty()))
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
