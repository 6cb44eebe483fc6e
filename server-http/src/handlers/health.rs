use crate::models::{CacheHealth, HealthResponse};
use crate::state::AppState;
use axum::{extract::State, Json};
use tracing::warn;

/// GET /
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let cache = state.cache();
    let connected = match cache.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!(backend = cache.backend_name(), error = %e, "cache ping failed");
            false
        }
    };

    Json(HealthResponse {
        status: "ok".into(),
        message: "Scoreline API is running".into(),
        date: chrono::Utc::now().format("%Y-%m-%d").to_string(),
        cache: CacheHealth {
            backend: cache.backend_name(),
            connected,
        },
    })
}
