use axum::{
    Json,
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::convert::Infallible;
use tracing::debug;

use crate::{app_state::AppState, auth::dtos::ErrorResponse};

/// Cookie carrying the admin session token.
pub const SESSION_COOKIE: &str = "admin_token";

/// An authenticated editor, proven by a valid session cookie.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub username: String,
}

impl AdminSession {
    fn from_parts(parts: &Parts, state: &AppState) -> Result<Self, AuthError> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let claims = state.jwt.verify_token(&token).map_err(|e| {
            debug!(error = %e, "rejected admin session token");
            AuthError::InvalidToken
        })?;

        Ok(Self {
            username: claims.sub,
        })
    }
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Self::from_parts(parts, state)
    }
}

impl OptionalFromRequestParts<AppState> for AdminSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(Self::from_parts(parts, state).ok())
    }
}

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        debug!(reason = ?self, "admin session rejected");
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Não autorizado")),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{session_cookie, test_state};
    use axum::{Router, body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    async fn protected_handler(session: AdminSession) -> String {
        session.username
    }

    async fn optional_handler(session: Option<AdminSession>) -> &'static str {
        if session.is_some() { "admin" } else { "anon" }
    }

    fn create_test_app() -> Router {
        Router::new()
            .route("/protected", get(protected_handler))
            .route("/optional", get(optional_handler))
            .with_state(test_state())
    }

    async fn body_string(response: Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_cookie() {
        let request = Request::builder()
            .uri("/protected")
            .body(Body::empty())
            .unwrap();

        let response = create_test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_string(response).await.contains("Não autorizado"));
    }

    #[tokio::test]
    async fn test_forged_token() {
        let token = crate::auth::jwt::JwtService::new("another-secret")
            .generate_token("admin")
            .unwrap();
        let request = Request::builder()
            .uri("/protected")
            .header("cookie", format!("{SESSION_COOKIE}={token}"))
            .body(Body::empty())
            .unwrap();

        let response = create_test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_session() {
        let request = Request::builder()
            .uri("/protected")
            .header("cookie", session_cookie())
            .body(Body::empty())
            .unwrap();

        let response = create_test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "admin");
    }

    #[tokio::test]
    async fn test_optional_session() {
        let app = create_test_app();

        let anon = Request::builder()
            .uri("/optional")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(anon).await.unwrap();
        assert_eq!(body_string(response).await, "anon");

        let admin = Request::builder()
            .uri("/optional")
            .header("cookie", session_cookie())
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(admin).await.unwrap();
        assert_eq!(body_string(response).await, "admin");
    }
}
