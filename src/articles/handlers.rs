use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info};

use crate::{
    app_state::AppState,
    articles::dtos::{CreateArticleRequest, ListArticlesQuery, UpdateArticleRequest},
    auth::{
        AdminSession,
        dtos::{ErrorResponse, SuccessResponse},
    },
    entities::{Article, ArticleFilter},
    repositories::StoreError,
};

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}

fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Artigo não encontrado")
}

fn store_failure(err: StoreError) -> Response {
    match err {
        StoreError::SlugConflict(slug) => {
            info!(%slug, "article slug already taken");
            error_response(StatusCode::CONFLICT, "Já existe um artigo com este título")
        }
        StoreError::Database(e) => {
            error!(error = %e, "article write failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Erro no banco de dados")
        }
    }
}

fn database_failure(err: anyhow::Error) -> Response {
    error!(error = %err, "article query failed");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Erro no banco de dados")
}

/// Drafts exist only for the newsroom.
fn visible(article: Option<Article>, admin: &Option<AdminSession>) -> Option<Article> {
    article.filter(|a| a.published || admin.is_some())
}

#[utoipa::path(
    get,
    path = "/api/articles",
    tag = "articles",
    params(ListArticlesQuery),
    responses((status = 200, description = "Articles, newest first", body = Vec<Article>))
)]
pub async fn list_articles(
    admin: Option<AdminSession>,
    State(state): State<AppState>,
    Query(query): Query<ListArticlesQuery>,
) -> Response {
    let mut filter = ArticleFilter::from(query);
    if admin.is_none() {
        filter.published = Some(true);
    }

    match state.article_repo.list(filter).await {
        Ok(articles) => Json(articles).into_response(),
        Err(e) => database_failure(e),
    }
}

#[utoipa::path(
    post,
    path = "/api/articles",
    tag = "articles",
    request_body = CreateArticleRequest,
    responses(
        (status = 201, description = "Article created", body = Article),
        (status = 400, description = "Missing title or content", body = ErrorResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 409, description = "Slug already taken", body = ErrorResponse)
    )
)]
pub async fn create_article(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(payload): Json<CreateArticleRequest>,
) -> Response {
    if let Err(error) = payload.validate() {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response();
    }

    match state.article_repo.create(payload.into_new_article()).await {
        Ok(article) => {
            info!(article_id = article.id, slug = %article.slug, "article created");
            (StatusCode::CREATED, Json(article)).into_response()
        }
        Err(e) => store_failure(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/articles/{id}",
    tag = "articles",
    params(("id" = i64, Path, description = "Article id")),
    responses(
        (status = 200, description = "The article", body = Article),
        (status = 404, description = "No such article", body = ErrorResponse)
    )
)]
pub async fn get_article(
    admin: Option<AdminSession>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Response {
    match state.article_repo.find_by_id(id).await {
        Ok(found) => match visible(found, &admin) {
            Some(article) => Json(article).into_response(),
            None => not_found(),
        },
        Err(e) => database_failure(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/articles/slug/{slug}",
    tag = "articles",
    params(("slug" = String, Path, description = "Article slug")),
    responses(
        (status = 200, description = "The article", body = Article),
        (status = 404, description = "No such article", body = ErrorResponse)
    )
)]
pub async fn get_article_by_slug(
    admin: Option<AdminSession>,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Response {
    match state.article_repo.find_by_slug(&slug).await {
        Ok(found) => match visible(found, &admin) {
            Some(article) => Json(article).into_response(),
            None => not_found(),
        },
        Err(e) => database_failure(e),
    }
}

#[utoipa::path(
    put,
    path = "/api/articles/{id}",
    tag = "articles",
    params(("id" = i64, Path, description = "Article id")),
    request_body = UpdateArticleRequest,
    responses(
        (status = 200, description = "Updated article", body = Article),
        (status = 400, description = "Blank title or content", body = ErrorResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 404, description = "No such article", body = ErrorResponse),
        (status = 409, description = "Slug already taken", body = ErrorResponse)
    )
)]
pub async fn update_article(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateArticleRequest>,
) -> Response {
    if let Err(error) = payload.validate() {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response();
    }

    match state.article_repo.update(id, payload.into_changes()).await {
        Ok(Some(article)) => Json(article).into_response(),
        Ok(None) => not_found(),
        Err(e) => store_failure(e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/articles/{id}",
    tag = "articles",
    params(("id" = i64, Path, description = "Article id")),
    responses(
        (status = 200, description = "Deleted", body = SuccessResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 404, description = "No such article", body = ErrorResponse)
    )
)]
pub async fn delete_article(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Response {
    match state.article_repo.delete(id).await {
        Ok(true) => {
            info!(article_id = id, "article deleted");
            Json(SuccessResponse::ok()).into_response()
        }
        Ok(false) => not_found(),
        Err(e) => database_failure(e),
    }
}
