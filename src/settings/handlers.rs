use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::collections::BTreeMap;
use tracing::{error, info};

use crate::{
    app_state::AppState,
    auth::{
        AdminSession,
        dtos::{ErrorResponse, SuccessResponse},
    },
    repositories::settings::is_secret_key,
};

#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "settings",
    responses((status = 200, description = "Site settings; credentials only for admins", body = BTreeMap<String, String>))
)]
pub async fn get_settings(admin: Option<AdminSession>, State(state): State<AppState>) -> Response {
    match state.settings_repo.all().await {
        Ok(mut settings) => {
            if admin.is_none() {
                settings.retain(|key, _| !is_secret_key(key));
            }
            Json(settings).into_response()
        }
        Err(e) => {
            error!(error = %e, "failed to load settings");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Erro no banco de dados")),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/settings",
    tag = "settings",
    request_body = BTreeMap<String, String>,
    responses(
        (status = 200, description = "Every key upserted", body = SuccessResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    )
)]
pub async fn update_settings(
    admin: AdminSession,
    State(state): State<AppState>,
    Json(payload): Json<BTreeMap<String, String>>,
) -> Response {
    for (key, value) in &payload {
        if let Err(e) = state.settings_repo.set(key, value).await {
            error!(error = %e, %key, "failed to save setting");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Erro ao salvar configurações")),
            )
                .into_response();
        }
    }

    let keys: Vec<&str> = payload.keys().map(String::as_str).collect();
    info!(username = %admin.username, ?keys, "settings updated");
    Json(SuccessResponse::ok()).into_response()
}
