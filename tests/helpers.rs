#![allow(dead_code)]

use url::Url;
use wiremock::MockServer;

/// Base URL of a mock server, usable as an API base.
pub fn base_url(server: &MockServer) -> Url {
    Url::parse(&server.uri()).expect("mock server uri")
}

/// Chat completion payload wrapping `content` as the assistant reply.
pub fn chat_reply(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

/// Migrated pool for `TEST_DATABASE_URL`, or `None` to skip the test.
pub async fn test_pool() -> Option<sqlx::PgPool> {
    let Ok(database_url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("Skipping database tests: TEST_DATABASE_URL not set");
        return None;
    };

    let pool = sqlx::PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    Some(pool)
}

/// Value of the `Set-Cookie` header reduced to `name=value`.
pub fn session_cookie(response: &axum::response::Response) -> String {
    let set_cookie = response
        .headers()
        .get(axum::http::header::SET_COOKIE)
        .expect("Set-Cookie header")
        .to_str()
        .expect("ascii cookie");
    set_cookie.split(';').next().unwrap_or_default().to_string()
}
