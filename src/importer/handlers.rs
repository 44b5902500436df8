use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    app_state::AppState,
    auth::{AdminSession, dtos::ErrorResponse},
    entities::Article,
    importer::{
        ImportError,
        dtos::{Preview, ResolveOutcome, ResolveRequest, SkipResponse},
    },
};

#[utoipa::path(
    post,
    path = "/api/scrape",
    tag = "import",
    responses(
        (status = 200, description = "Preview of the next importable article", body = Preview),
        (status = 400, description = "Rewrite credential not configured", body = ErrorResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 404, description = "No candidates, or all consumed", body = ErrorResponse),
        (status = 422, description = "Article content could not be extracted", body = ErrorResponse),
        (status = 500, description = "Rewrite failed", body = ErrorResponse),
        (status = 502, description = "Source site unreachable", body = ErrorResponse)
    )
)]
pub async fn begin_import(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Preview>, ImportError> {
    let preview = state.importer.begin_import().await?;
    Ok(Json(preview))
}

#[utoipa::path(
    put,
    path = "/api/scrape",
    tag = "import",
    request_body = ResolveRequest,
    responses(
        (status = 201, description = "Draft article created", body = Article),
        (status = 200, description = "Source article skipped", body = SkipResponse),
        (status = 400, description = "Missing title, content or originalUrl", body = ErrorResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn resolve_import(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(payload): Json<ResolveRequest>,
) -> Result<Response, ImportError> {
    let response = match state.importer.resolve_import(payload).await? {
        ResolveOutcome::Skipped => Json(SkipResponse {
            success: true,
            skipped: true,
        })
        .into_response(),
        ResolveOutcome::Created(article) => (StatusCode::CREATED, Json(article)).into_response(),
    };
    Ok(response)
}
