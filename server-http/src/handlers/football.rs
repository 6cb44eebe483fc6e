use crate::models::{LeagueQuery, TeamQuery};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use scoreline::models::{MatchSummary, Player, Squad, StandingRow, Team};
use tracing::info;

/// GET /football/live
pub async fn live_scores(State(state): State<AppState>) -> Json<Vec<MatchSummary>> {
    Json(state.resolvers.live_scores().await)
}

/// GET /football/teams?league=
pub async fn teams(
    State(state): State<AppState>,
    Query(query): Query<LeagueQuery>,
) -> Json<Vec<Team>> {
    info!("TEAMS: league={}", query.league.code());
    Json(state.resolvers.teams(query.league).await)
}

/// GET /football/players?team_id=
pub async fn players(
    State(state): State<AppState>,
    Query(query): Query<TeamQuery>,
) -> Json<Vec<Player>> {
    info!("PLAYERS: team_id={}", query.team_id);
    Json(state.resolvers.players(query.team_id).await)
}

/// GET /football/standings?league=
pub async fn standings(
    State(state): State<AppState>,
    Query(query): Query<LeagueQuery>,
) -> Json<Vec<StandingRow>> {
    info!("STANDINGS: league={}", query.league.code());
    Json(state.resolvers.standings(query.league).await)
}

/// GET /football/squad?team_id=
pub async fn squad(
    State(state): State<AppState>,
    Query(query): Query<TeamQuery>,
) -> Json<Squad> {
    info!("SQUAD: team_id={}", query.team_id);
    Json(state.resolvers.squad(query.team_id).await)
}
