use crate::state::AppState;
use axum::{extract::State, Json};
use scoreline::models::{NflGame, NflPlayer};

/// GET /nfl/players
pub async fn nfl_players(State(state): State<AppState>) -> Json<Vec<NflPlayer>> {
    Json(state.resolvers.nfl_players().await)
}

/// GET /nfl/scores
pub async fn nfl_scores(State(state): State<AppState>) -> Json<Vec<NflGame>> {
    Json(state.resolvers.nfl_scores().await)
}
