use crate::entities::AdminUser;
use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminRepositoryTrait: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>>;
    /// Create the account or replace its password hash.
    async fn upsert(&self, username: &str, pw_hash: &str) -> Result<AdminUser>;
}

#[derive(Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminRepositoryTrait for AdminRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>> {
        let user = sqlx::query_as::<_, AdminUser>(
            r#"
            SELECT id, username, pw_hash
            FROM admin_users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn upsert(&self, username: &str, pw_hash: &str) -> Result<AdminUser> {
        let user = sqlx::query_as::<_, AdminUser>(
            r#"
            INSERT INTO admin_users (username, pw_hash)
            VALUES ($1, $2)
            ON CONFLICT (username) DO UPDATE SET pw_hash = EXCLUDED.pw_hash
            RETURNING id, username, pw_hash
            "#,
        )
        .bind(username)
        .bind(pw_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }
}
