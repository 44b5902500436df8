use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::{
    analytics::dtos::{AnalyticsSummary, TrackKind, TrackRequest},
    app_state::AppState,
    auth::{
        AdminSession,
        dtos::{ErrorResponse, SuccessResponse},
    },
};

#[utoipa::path(
    post,
    path = "/api/analytics",
    tag = "analytics",
    request_body = TrackRequest,
    responses(
        (status = 200, description = "Event counted", body = SuccessResponse),
        (status = 400, description = "Click without articleId", body = ErrorResponse),
        (status = 404, description = "Unknown article", body = ErrorResponse)
    )
)]
pub async fn track(State(state): State<AppState>, Json(payload): Json<TrackRequest>) -> Response {
    let result = match (payload.kind, payload.article_id) {
        (TrackKind::Pageview, _) => state.analytics_repo.track_page_view().await.map(|_| true),
        (TrackKind::Click, Some(article_id)) => state.analytics_repo.track_click(article_id).await,
        (TrackKind::Click, None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("articleId é obrigatório para cliques")),
            )
                .into_response();
        }
    };

    match result {
        Ok(true) => Json(SuccessResponse::ok()).into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Artigo não encontrado")),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "failed to record analytics event");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Erro ao registrar evento")),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/analytics",
    tag = "analytics",
    responses(
        (status = 200, description = "Dashboard counters", body = AnalyticsSummary),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    )
)]
pub async fn summary(_admin: AdminSession, State(state): State<AppState>) -> Response {
    match state.analytics_repo.summary().await {
        Ok(summary) => Json(summary).into_response(),
        Err(e) => {
            error!(error = %e, "failed to load analytics summary");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Erro ao carregar estatísticas")),
            )
                .into_response()
        }
    }
}
