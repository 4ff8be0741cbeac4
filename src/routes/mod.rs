//! Router assembly: quiz API under `/api/v1`, WebSocket, static frontend, CORS, HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Directory holding the built frontend; overridable with `STATIC_DIR`.
const DEFAULT_STATIC_DIR: &str = "./static";

/// Quiz endpoints, relative to `/api/v1`.
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(http::http_health))
        .route("/presets", get(http::http_get_presets))
        .route("/question", get(http::http_get_question))
        .route("/quiz", post(http::http_post_quiz))
        .route("/quiz/:id", get(http::http_get_quiz))
        .route("/quiz/:id/question", get(http::http_get_quiz_question))
        .route("/quiz/:id/answer", post(http::http_post_quiz_answer))
}

/// Build the application router. Unknown paths fall through to the SPA's
/// `index.html` so client-side routes survive a reload.
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| DEFAULT_STATIC_DIR.to_string());
    let static_service = ServeDir::new(&static_dir)
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new(format!("{static_dir}/index.html")));

    Router::new()
        .route("/ws", get(ws::ws_upgrade))
        .nest("/api/v1", api_routes())
        .with_state(state)
        // the quiz frontend may be served from another origin during development
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .fallback_service(static_service)
}
