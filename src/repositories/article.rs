use crate::entities::{Article, ArticleChanges, ArticleFilter, NewArticle};
use crate::repositories::StoreError;
use anyhow::Result;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

const ARTICLE_COLUMNS: &str = "id, title, slug, content, image, category, author, published, \
                               featured, clicks, created_at, updated_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleRepositoryTrait: Send + Sync {
    async fn create(&self, article: NewArticle) -> Result<Article, StoreError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Article>>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>>;
    async fn list(&self, filter: ArticleFilter) -> Result<Vec<Article>>;
    async fn update(&self, id: i64, changes: ArticleChanges) -> Result<Option<Article>, StoreError>;
    async fn delete(&self, id: i64) -> Result<bool>;
}

#[derive(Clone)]
pub struct ArticleRepository {
    pool: PgPool,
}

impl ArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleRepositoryTrait for ArticleRepository {
    async fn create(&self, article: NewArticle) -> Result<Article, StoreError> {
        let sql = format!(
            r#"
            INSERT INTO articles (title, slug, content, image, category, author, published, featured)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {ARTICLE_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Article>(&sql)
            .bind(&article.title)
            .bind(&article.slug)
            .bind(&article.content)
            .bind(&article.image)
            .bind(&article.category)
            .bind(&article.author)
            .bind(article.published)
            .bind(article.featured)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::from_write(e, &article.slug))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Article>> {
        let sql = format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1");
        let article = sqlx::query_as::<_, Article>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(article)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>> {
        let sql = format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE slug = $1");
        let article = sqlx::query_as::<_, Article>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(article)
    }

    async fn list(&self, filter: ArticleFilter) -> Result<Vec<Article>> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE TRUE"));
        if let Some(published) = filter.published {
            query.push(" AND published = ").push_bind(published);
        }
        if let Some(category) = filter.category {
            query.push(" AND category = ").push_bind(category);
        }
        if let Some(featured) = filter.featured {
            query.push(" AND featured = ").push_bind(featured);
        }
        query.push(" ORDER BY created_at DESC, id DESC");

        let articles = query
            .build_query_as::<Article>()
            .fetch_all(&self.pool)
            .await?;
        Ok(articles)
    }

    async fn update(&self, id: i64, changes: ArticleChanges) -> Result<Option<Article>, StoreError> {
        let sql = format!(
            r#"
            UPDATE articles
            SET title      = COALESCE($2, title),
                slug       = COALESCE($3, slug),
                content    = COALESCE($4, content),
                image      = COALESCE($5, image),
                category   = COALESCE($6, category),
                author     = COALESCE($7, author),
                published  = COALESCE($8, published),
                featured   = COALESCE($9, featured),
                updated_at = now()
            WHERE id = $1
            RETURNING {ARTICLE_COLUMNS}
            "#
        );
        let slug = changes.slug.clone().unwrap_or_default();
        sqlx::query_as::<_, Article>(&sql)
            .bind(id)
            .bind(changes.title)
            .bind(changes.slug)
            .bind(changes.content)
            .bind(changes.image)
            .bind(changes.category)
            .bind(changes.author)
            .bind(changes.published)
            .bind(changes.featured)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::from_write(e, &slug))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
