use scoreline::League;
use serde::{Deserialize, Serialize};

// === Query Models ===

#[derive(Debug, Deserialize)]
pub struct LeagueQuery {
    #[serde(default)]
    pub league: League,
}

#[derive(Debug, Deserialize)]
pub struct TeamQuery {
    pub team_id: u64,
}

#[derive(Debug, Deserialize)]
pub struct ImageQuery {
    #[serde(default)]
    pub url: String,
}

// === Health Models ===

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub date: String,
    pub cache: CacheHealth,
}

#[derive(Debug, Serialize)]
pub struct CacheHealth {
    pub backend: &'static str,
    pub connected: bool,
}
