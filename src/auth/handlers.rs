use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::{error, info, warn};

use crate::{
    app_state::AppState,
    auth::{
        dtos::{ErrorResponse, LoginRequest, SessionResponse, SuccessResponse},
        middleware::{AdminSession, SESSION_COOKIE},
    },
    passwords::Passwords,
};

fn invalid_credentials() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse::new("Usuário ou senha inválidos")),
    )
        .into_response()
}

fn internal(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(message)),
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/api/auth",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session cookie set", body = SuccessResponse),
        (status = 400, description = "Missing fields", body = ErrorResponse),
        (status = 401, description = "Wrong username or password", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Response {
    if let Err(error) = payload.validate() {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response();
    }

    let admin = match state.admin_repo.find_by_username(payload.username.trim()).await {
        Ok(Some(admin)) => admin,
        Ok(None) => {
            warn!(username = %payload.username, "login for unknown admin");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "admin lookup failed");
            return internal("Erro no banco de dados");
        }
    };

    let passwords = match Passwords::standard() {
        Ok(passwords) => passwords,
        Err(e) => {
            error!(error = %e, "argon2 setup failed");
            return internal("Erro ao verificar senha");
        }
    };

    let (is_valid, needs_rehash) = match passwords.verify(&payload.password, &admin.pw_hash) {
        Ok(result) => result,
        Err(e) => {
            error!(error = %e, username = %admin.username, "stored hash is unreadable");
            return internal("Erro ao verificar senha");
        }
    };

    if !is_valid {
        warn!(username = %admin.username, "login with wrong password");
        return invalid_credentials();
    }

    if needs_rehash {
        // Best effort; the login itself already succeeded.
        match passwords.hash(&payload.password) {
            Ok(pw_hash) => {
                if let Err(e) = state.admin_repo.upsert(&admin.username, &pw_hash).await {
                    warn!(error = %e, "could not upgrade admin password hash");
                }
            }
            Err(e) => warn!(error = %e, "could not rehash admin password"),
        }
    }

    let token = match state.jwt.generate_token(&admin.username) {
        Ok(token) => token,
        Err(e) => {
            error!(error = %e, "failed to sign session token");
            return internal("Erro ao gerar sessão");
        }
    };

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.secure_cookies);

    info!(username = %admin.username, "admin logged in");
    (jar.add(cookie), Json(SuccessResponse::ok())).into_response()
}

#[utoipa::path(
    get,
    path = "/api/auth",
    tag = "auth",
    responses((status = 200, description = "Current session, if any", body = SessionResponse))
)]
pub async fn session(session: Option<AdminSession>) -> Json<SessionResponse> {
    Json(SessionResponse {
        authenticated: session.is_some(),
        username: session.map(|s| s.username),
    })
}

#[utoipa::path(
    delete,
    path = "/api/auth",
    tag = "auth",
    responses((status = 200, description = "Session cookie cleared", body = SuccessResponse))
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<SuccessResponse>) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Json(SuccessResponse::ok()))
}
