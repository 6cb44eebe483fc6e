use super::null_as_default;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventsPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub events: Vec<Event>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Event {
    pub id: Option<i64>,
    pub home_team: Option<TeamRef>,
    pub away_team: Option<TeamRef>,
    pub home_score: Option<Score>,
    pub away_score: Option<Score>,
    pub status: Option<Status>,
    pub tournament: Option<Tournament>,
    pub start_timestamp: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TeamRef {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub short_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Score {
    pub current: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Status {
    pub code: Option<i64>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Tournament {
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SeasonsPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub seasons: Vec<Season>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Season {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub year: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TeamsPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub teams: Vec<TeamRef>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StandingsPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub standings: Vec<StandingTable>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StandingTable {
    pub name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub rows: Vec<StandingRow>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StandingRow {
    pub position: Option<i64>,
    pub team: Option<TeamRef>,
    pub matches: Option<i64>,
    pub wins: Option<i64>,
    pub draws: Option<i64>,
    pub losses: Option<i64>,
    pub scores_for: Option<i64>,
    pub scores_against: Option<i64>,
    pub points: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlayersPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub players: Vec<PlayerEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlayerEntry {
    pub player: Option<PlayerRaw>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerRaw {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub position: Option<String>,
    pub jersey_number: Option<String>,
    pub shirt_number: Option<i64>,
    pub country: Option<Country>,
    pub date_of_birth_timestamp: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Country {
    pub name: Option<String>,
}
