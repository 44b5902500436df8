//! Shared fixtures for router-level tests.

use sqlx::{Pool, Postgres};
use std::sync::Arc;
use url::Url;

use crate::{
    app_state::AppState,
    auth::{jwt::JwtService, middleware::SESSION_COOKIE},
    images::MockImageSearch,
    importer::ImportPipeline,
    repositories::{
        admin::MockAdminRepositoryTrait, analytics::MockAnalyticsRepositoryTrait,
        article::MockArticleRepositoryTrait, ledger::MockDedupLedger,
        settings::MockSettingsRepositoryTrait,
    },
    rewriter::MockRewriter,
};

pub const TEST_JWT_SECRET: &str = "test-secret";

fn create_test_pool() -> Pool<Postgres> {
    // Never connects unless a handler actually queries it.
    Pool::<Postgres>::connect_lazy("postgresql://dummy").expect("Failed to create test pool")
}

/// State whose collaborators are expectation-free mocks: any call a test did
/// not set up panics. Override fields with struct update syntax.
pub fn test_state() -> AppState {
    let articles = Arc::new(MockArticleRepositoryTrait::new());
    let settings = Arc::new(MockSettingsRepositoryTrait::new());
    let images = Arc::new(MockImageSearch::new());
    let importer = ImportPipeline::new(
        Url::parse("http://127.0.0.1:9/").expect("static url"),
        articles.clone(),
        settings.clone(),
        Arc::new(MockDedupLedger::new()),
        Arc::new(MockRewriter::new()),
        images.clone(),
    );

    AppState {
        article_repo: articles,
        settings_repo: settings,
        analytics_repo: Arc::new(MockAnalyticsRepositoryTrait::new()),
        admin_repo: Arc::new(MockAdminRepositoryTrait::new()),
        images,
        importer: Arc::new(importer),
        jwt: Arc::new(JwtService::new(TEST_JWT_SECRET)),
        secure_cookies: false,
        db_pool: create_test_pool(),
    }
}

/// `Cookie` header value for a logged-in admin.
pub fn session_cookie() -> String {
    let token = JwtService::new(TEST_JWT_SECRET)
        .generate_token("admin")
        .expect("Failed to generate token");
    format!("{SESSION_COOKIE}={token}")
}
