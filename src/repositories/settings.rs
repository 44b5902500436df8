use crate::entities::Setting;
use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::BTreeMap;

/// Credential for the rewrite service.
pub const REWRITE_API_KEY: &str = "xai_api_key";
/// Credential for the photo search service.
pub const IMAGE_API_KEY: &str = "pexels_api_key";

/// Settings seeded by the `migrate` binary when absent.
pub const DEFAULT_SETTINGS: [(&str, &str); 3] = [
    ("site_name", "Acréscimos"),
    ("site_description", "A Notícia Além do Tempo"),
    (
        "breaking_news",
        "URGENTE: Treinador da seleção convoca substituto.|MERCADO: Clube saudita faz proposta milionária.|LIBERTADORES: Conmebol define datas das finais.|BASQUETE: Astro da NBA anuncia aposentadoria.",
    ),
];

/// Keys that hold service credentials and are hidden from anonymous readers.
pub fn is_secret_key(key: &str) -> bool {
    key.ends_with("_api_key")
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsRepositoryTrait: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    async fn all(&self) -> Result<BTreeMap<String, String>>;
    /// Insert only when the key is absent.
    async fn seed(&self, key: &str, value: &str) -> Result<()>;
}

#[derive(Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepositoryTrait for SettingsRepository {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let value = sqlx::query_scalar("SELECT value FROM site_settings WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO site_settings (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn all(&self) -> Result<BTreeMap<String, String>> {
        let rows = sqlx::query_as::<_, Setting>("SELECT key, value FROM site_settings")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|s| (s.key, s.value)).collect())
    }

    async fn seed(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO site_settings (key, value) VALUES ($1, $2) ON CONFLICT (key) DO NOTHING",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
