use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::normalize_path::NormalizePath;
use tower_http::trace::TraceLayer;

/// Router wrapped so trailing slashes are trimmed before routing
pub type App = NormalizePath<Router>;

/// Build the router with path normalization in front of it
pub fn build_app(state: AppState) -> App {
    NormalizePath::trim_trailing_slash(build_router(state))
}

/// Build and configure the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/", get(handlers::health_check))
        // Football routes
        .route("/football/live", get(handlers::live_scores))
        .route("/football/teams", get(handlers::teams))
        .route("/football/players", get(handlers::players))
        .route("/football/standings", get(handlers::standings))
        .route("/football/squad", get(handlers::squad))
        // NFL routes
        .route("/nfl/players", get(handlers::nfl_players))
        .route("/nfl/scores", get(handlers::nfl_scores))
        // Image relay
        .route("/proxy/image", get(handlers::proxy_image))
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
