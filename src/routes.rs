use axum::{
    Router,
    body::Body,
    http::{HeaderName, Request},
    routing::{get, post},
};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info_span;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    analytics, app_state::AppState, articles, auth, health, images, importer,
    openapi::ApiDoc, settings,
};

const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn router(state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let api = Router::new()
        .route(
            "/auth",
            post(auth::handlers::login)
                .get(auth::handlers::session)
                .delete(auth::handlers::logout),
        )
        .route(
            "/articles",
            get(articles::handlers::list_articles).post(articles::handlers::create_article),
        )
        .route(
            "/articles/{id}",
            get(articles::handlers::get_article)
                .put(articles::handlers::update_article)
                .delete(articles::handlers::delete_article),
        )
        .route(
            "/articles/slug/{slug}",
            get(articles::handlers::get_article_by_slug),
        )
        .route(
            "/settings",
            get(settings::handlers::get_settings).put(settings::handlers::update_settings),
        )
        .route(
            "/analytics",
            post(analytics::handlers::track).get(analytics::handlers::summary),
        )
        .route("/images", get(images::handlers::search_images))
        .route(
            "/scrape",
            post(importer::handlers::begin_import).put(importer::handlers::resolve_import),
        );

    Router::new()
        .route("/healthz", get(health::health_check))
        .nest("/api", api)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                info_span!(
                    "http",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .with_state(state)
}
