use acrescimos::{
    config::Config,
    passwords::Passwords,
    repositories::{
        AdminRepository, AdminRepositoryTrait, SettingsRepository, SettingsRepositoryTrait,
        settings::DEFAULT_SETTINGS,
    },
    telemetry,
};
use anyhow::Result;
use sqlx::{Pool, Postgres, postgres::PgPoolOptions};
use tracing::{info, warn};

const ENV_ADMIN_USERNAME: &str = "ADMIN_USERNAME";
const ENV_ADMIN_PASSWORD: &str = "ADMIN_PASSWORD";

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing("info");

    let config = Config::from_env()?;
    let pool: Pool<Postgres> = PgPoolOptions::new()
        .max_connections(5)
        .connect(config.database_url())
        .await?;

    // runs all pending migrations; no-op if up-to-date
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("migrations applied");

    let settings = SettingsRepository::new(pool.clone());
    for (key, value) in DEFAULT_SETTINGS {
        settings.seed(key, value).await?;
    }

    match (
        std::env::var(ENV_ADMIN_USERNAME),
        std::env::var(ENV_ADMIN_PASSWORD),
    ) {
        (Ok(username), Ok(password)) if !username.trim().is_empty() => {
            let pw_hash = Passwords::standard()?.hash(&password)?;
            let admin = AdminRepository::new(pool)
                .upsert(username.trim(), &pw_hash)
                .await?;
            info!(username = %admin.username, "admin account ready");
        }
        _ => warn!(
            "{ENV_ADMIN_USERNAME}/{ENV_ADMIN_PASSWORD} not set; admin accounts left unchanged"
        ),
    }

    Ok(())
}
