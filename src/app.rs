use crate::handlers::{self, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Scoring and listing routes, without state.
///
/// Kept separate so the binary can wrap them in rate limiting while the
/// health routes stay unthrottled.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/score", post(handlers::score_lead))
        .route("/api/leads", get(handlers::list_leads))
}

/// Builds the full application router.
///
/// When `static_dir` is set, unmatched paths are served from it and unknown
/// files fall back to `index.html`. Otherwise `/` answers the health message.
pub fn build_app(
    state: Arc<AppState>,
    api: Router<Arc<AppState>>,
    static_dir: Option<&Path>,
) -> Router {
    let router = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/health", get(handlers::health))
        .merge(api);

    let router = match static_dir {
        Some(dir) => router.fallback_service(
            ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html"))),
        ),
        None => router.route("/", get(handlers::health)),
    };

    // Body limit goes on its own layer so axum maps its response body back
    // to `Body` before CORS sees it.
    router
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}
