//! Client-facing payloads. Field order here is the order they serialize in.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub id: Option<i64>,
    pub home_team: String,
    pub away_team: String,
    pub home_team_id: Option<i64>,
    pub away_team_id: Option<i64>,
    pub home_score: Option<i64>,
    pub away_score: Option<i64>,
    pub status: String,
    pub status_code: Option<i64>,
    pub is_live: bool,
    pub tournament: String,
    pub start_timestamp: Option<i64>,
    pub home_logo: Option<String>,
    pub away_logo: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: Option<i64>,
    pub name: String,
    pub short_name: Option<String>,
    pub logo: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: Option<i64>,
    pub name: String,
    pub position: Option<String>,
    pub shirt_number: Option<String>,
    pub nationality: Option<String>,
    pub date_of_birth_timestamp: Option<i64>,
    pub photo: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StandingRow {
    pub position: Option<i64>,
    pub team_id: Option<i64>,
    pub team: String,
    pub logo: Option<String>,
    pub played: i64,
    pub won: i64,
    pub drawn: i64,
    pub lost: i64,
    pub goals_for: i64,
    pub goals_against: i64,
    pub goal_difference: i64,
    pub points: i64,
}

/// Players grouped by position. All four groups are always present.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Squad {
    pub goalkeepers: Vec<Player>,
    pub defenders: Vec<Player>,
    pub midfielders: Vec<Player>,
    pub forwards: Vec<Player>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NflPlayer {
    pub id: Option<String>,
    pub name: String,
    pub jersey: Option<String>,
    pub position: Option<String>,
    pub team: Option<String>,
    pub team_abbreviation: Option<String>,
    pub headshot: Option<String>,
    pub age: Option<i64>,
    pub experience_years: Option<i64>,
    pub college: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NflGame {
    pub id: Option<String>,
    pub name: String,
    pub short_name: Option<String>,
    pub home_team: String,
    pub away_team: String,
    pub home_abbreviation: Option<String>,
    pub away_abbreviation: Option<String>,
    pub home_score: Option<i64>,
    pub away_score: Option<i64>,
    pub status: String,
    pub detail: Option<String>,
    pub is_live: bool,
    pub completed: bool,
    pub start_time: Option<String>,
    pub home_logo: Option<String>,
    pub away_logo: Option<String>,
}
