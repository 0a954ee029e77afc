use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Title selector
        .route("/titles", get(handlers::get_titles))
        .route("/titles/search", get(handlers::search_titles))
        // Sessions
        .route("/sessions", post(handlers::create_session))
        .route(
            "/sessions/:session_id",
            axum::routing::delete(handlers::delete_session),
        )
        .route("/sessions/:session_id/page", get(handlers::get_page))
        .route("/sessions/:session_id/actions", post(handlers::apply_action))
}
