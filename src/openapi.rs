use utoipa::OpenApi;

use crate::{
    analytics::{self, dtos::{AnalyticsSummary, TopArticle, TrackKind, TrackRequest}},
    articles::{
        self,
        dtos::{CreateArticleRequest, UpdateArticleRequest},
    },
    auth::{
        self,
        dtos::{ErrorResponse, LoginRequest, SessionResponse, SuccessResponse},
    },
    entities::{Article, DailyCount},
    extractor::ScrapedRecord,
    health::{self, HealthResponse},
    images::{self, ImageResult, dtos::ImageSearchResponse},
    importer::{
        self,
        dtos::{Preview, ResolveRequest, RewrittenDraft, SkipResponse},
    },
    settings,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Acréscimos API", description = "Editorial backend and article import pipeline"),
    paths(
        health::health_check,
        auth::handlers::login,
        auth::handlers::session,
        auth::handlers::logout,
        articles::handlers::list_articles,
        articles::handlers::create_article,
        articles::handlers::get_article,
        articles::handlers::get_article_by_slug,
        articles::handlers::update_article,
        articles::handlers::delete_article,
        settings::handlers::get_settings,
        settings::handlers::update_settings,
        analytics::handlers::track,
        analytics::handlers::summary,
        images::handlers::search_images,
        importer::handlers::begin_import,
        importer::handlers::resolve_import,
    ),
    components(schemas(
        Article,
        DailyCount,
        HealthResponse,
        LoginRequest,
        SessionResponse,
        SuccessResponse,
        ErrorResponse,
        CreateArticleRequest,
        UpdateArticleRequest,
        AnalyticsSummary,
        TopArticle,
        TrackKind,
        TrackRequest,
        ImageResult,
        ImageSearchResponse,
        ScrapedRecord,
        Preview,
        RewrittenDraft,
        ResolveRequest,
        SkipResponse,
    )),
    tags(
        (name = "articles", description = "Article CRUD"),
        (name = "import", description = "Scrape, rewrite and import pipeline"),
    )
)]
pub struct ApiDoc;
