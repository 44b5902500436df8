use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::{
    app_state::AppState,
    auth::{AdminSession, dtos::ErrorResponse},
    images::{
        QUERY_QUALIFIER,
        dtos::{ImageQuery, ImageSearchResponse},
    },
    repositories::settings::IMAGE_API_KEY,
};

/// Results offered by the editor's image picker.
pub const PICKER_RESULTS: u8 = 12;

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}

#[utoipa::path(
    get,
    path = "/api/images",
    tag = "images",
    params(ImageQuery),
    responses(
        (status = 200, description = "Landscape sports photos", body = ImageSearchResponse),
        (status = 400, description = "Missing q or image credential", body = ErrorResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 502, description = "Image search failed", body = ErrorResponse)
    )
)]
pub async fn search_images(
    _admin: AdminSession,
    State(state): State<AppState>,
    Query(query): Query<ImageQuery>,
) -> Response {
    let Some(terms) = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "Parâmetro q obrigatório");
    };

    let api_key = match state.settings_repo.get(IMAGE_API_KEY).await {
        Ok(Some(key)) if !key.trim().is_empty() => key,
        Ok(_) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Chave da API Pexels não configurada. Vá em Configurações.",
            );
        }
        Err(e) => {
            error!(error = %e, "could not read image search credential");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Erro no banco de dados");
        }
    };

    let search_query = format!("{terms} {QUERY_QUALIFIER}");
    match state
        .images
        .search(&api_key, &search_query, PICKER_RESULTS)
        .await
    {
        Ok(images) => Json(ImageSearchResponse { images }).into_response(),
        Err(e) => {
            warn!(error = %e, query = %search_query, "image picker search failed");
            error_response(StatusCode::BAD_GATEWAY, "Erro ao buscar imagens")
        }
    }
}
