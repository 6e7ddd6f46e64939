//! HTTP document store for the site's configuration documents, plus the
//! cached public views the marketing site renders from.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

mod file_store;
pub mod rest;
mod state;

pub use file_store::FileDocumentStore;
pub use state::AppState;

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/", get(|| async { "ok" }))
        // Admin document store
        .route(
            "/api/config/{kind}",
            get(rest::api_get_config)
                .put(rest::api_put_config)
                .delete(rest::api_delete_config),
        )
        // Public site
        .route("/api/public/{kind}", get(rest::api_public))
        .route("/api/revalidate", post(rest::api_revalidate))
        .with_state(state)
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}
