pub mod admin;
pub mod analytics;
pub mod article;
pub mod ledger;
pub mod settings;

use thiserror::Error;

pub use admin::{AdminRepository, AdminRepositoryTrait};
pub use analytics::{AnalyticsRepository, AnalyticsRepositoryTrait};
pub use article::{ArticleRepository, ArticleRepositoryTrait};
pub use ledger::{DedupLedger, PgDedupLedger};
pub use settings::{SettingsRepository, SettingsRepositoryTrait};

/// Postgres `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Failures the caller has to tell apart.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("slug already in use: {0}")]
    SlugConflict(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    fn from_write(err: sqlx::Error, slug: &str) -> Self {
        let is_unique_violation = err
            .as_database_error()
            .and_then(|db| db.code())
            .is_some_and(|code| code == UNIQUE_VIOLATION);
        if is_unique_violation {
            Self::SlugConflict(slug.to_string())
        } else {
            Self::Database(err)
        }
    }
}

/// Skip database-backed tests unless `TEST_DATABASE_URL` points at a
/// scratch database.
#[cfg(test)]
pub(crate) async fn setup_test_db() -> Option<sqlx::PgPool> {
    let database_url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping database tests: TEST_DATABASE_URL not set");
            return None;
        }
    };

    let pool = sqlx::PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    Some(pool)
}
