use crate::{
    auth::jwt::JwtService,
    config::Config,
    images::{ImageSearch, PexelsClient},
    importer::ImportPipeline,
    repositories::{
        AdminRepository, AdminRepositoryTrait, AnalyticsRepository, AnalyticsRepositoryTrait,
        ArticleRepository, ArticleRepositoryTrait, DedupLedger, PgDedupLedger, SettingsRepository,
        SettingsRepositoryTrait,
    },
    rewriter::ChatCompletionRewriter,
};
use sqlx::{Pool, Postgres};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub article_repo: Arc<dyn ArticleRepositoryTrait + Send + Sync>,
    pub settings_repo: Arc<dyn SettingsRepositoryTrait + Send + Sync>,
    pub analytics_repo: Arc<dyn AnalyticsRepositoryTrait + Send + Sync>,
    pub admin_repo: Arc<dyn AdminRepositoryTrait + Send + Sync>,
    pub images: Arc<dyn ImageSearch + Send + Sync>,
    pub importer: Arc<ImportPipeline>,
    pub jwt: Arc<JwtService>,
    pub secure_cookies: bool,
    pub db_pool: Pool<Postgres>,
}

impl AppState {
    pub fn new(pool: Pool<Postgres>, config: &Config) -> anyhow::Result<Self> {
        let article_repo: Arc<dyn ArticleRepositoryTrait + Send + Sync> =
            Arc::new(ArticleRepository::new(pool.clone()));
        let settings_repo: Arc<dyn SettingsRepositoryTrait + Send + Sync> =
            Arc::new(SettingsRepository::new(pool.clone()));
        let ledger: Arc<dyn DedupLedger + Send + Sync> =
            Arc::new(PgDedupLedger::new(pool.clone()));
        let images: Arc<dyn ImageSearch + Send + Sync> =
            Arc::new(PexelsClient::new(config.image_api_base())?);
        let rewriter = Arc::new(ChatCompletionRewriter::new(
            config.rewrite_api_base(),
            config.rewrite_model(),
        )?);

        let importer = ImportPipeline::new(
            config.source_url().clone(),
            article_repo.clone(),
            settings_repo.clone(),
            ledger,
            rewriter,
            images.clone(),
        );

        Ok(Self {
            article_repo,
            settings_repo,
            analytics_repo: Arc::new(AnalyticsRepository::new(pool.clone())),
            admin_repo: Arc::new(AdminRepository::new(pool.clone())),
            images,
            importer: Arc::new(importer),
            jwt: Arc::new(JwtService::new(config.jwt_secret())),
            secure_cookies: config.secure_cookies(),
            db_pool: pool,
        })
    }
}
