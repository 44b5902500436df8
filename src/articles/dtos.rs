use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    articles::{ArticleInputError, check_title, sanitize_content, slug::slugify},
    entities::{ArticleChanges, ArticleFilter, DEFAULT_CATEGORY, HOUSE_AUTHOR, NewArticle},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateArticleRequest {
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub published: Option<bool>,
    pub featured: Option<bool>,
}

impl CreateArticleRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.content.trim().is_empty() {
            return Err(ArticleInputError::MissingFields.to_string());
        }
        check_title(&self.title).map_err(|e| e.to_string())?;
        Ok(())
    }

    pub fn into_new_article(self) -> NewArticle {
        NewArticle {
            slug: slugify(self.title.trim()),
            title: self.title.trim().to_string(),
            content: sanitize_content(&self.content),
            image: self.image.unwrap_or_default(),
            category: non_blank(self.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            author: non_blank(self.author).unwrap_or_else(|| HOUSE_AUTHOR.to_string()),
            published: self.published.unwrap_or(true),
            featured: self.featured.unwrap_or(false),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub published: Option<bool>,
    pub featured: Option<bool>,
}

impl UpdateArticleRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(title) = self.title.as_deref() {
            match check_title(title) {
                Err(ArticleInputError::MissingFields) => {
                    return Err("Título não pode ser vazio".to_string());
                }
                Err(e) => return Err(e.to_string()),
                Ok(_) => {}
            }
        }
        if self.content.as_deref().is_some_and(|c| c.trim().is_empty()) {
            return Err("Conteúdo não pode ser vazio".to_string());
        }
        Ok(())
    }

    /// A new title also moves the slug.
    pub fn into_changes(self) -> ArticleChanges {
        let title = self.title.map(|t| t.trim().to_string());
        ArticleChanges {
            slug: title.as_deref().map(slugify),
            title,
            content: self.content.as_deref().map(sanitize_content),
            image: self.image,
            category: self.category,
            author: self.author,
            published: self.published,
            featured: self.featured,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListArticlesQuery {
    pub published: Option<bool>,
    pub category: Option<String>,
    pub featured: Option<bool>,
}

impl From<ListArticlesQuery> for ArticleFilter {
    fn from(query: ListArticlesQuery) -> Self {
        ArticleFilter {
            published: query.published,
            category: non_blank(query.category),
            featured: query.featured,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
