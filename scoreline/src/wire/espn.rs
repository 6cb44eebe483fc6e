use super::null_as_default;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RosterPayload {
    pub team: Option<RosterTeam>,
    #[serde(deserialize_with = "null_as_default")]
    pub athletes: Vec<AthleteGroup>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RosterTeam {
    pub display_name: Option<String>,
    pub abbreviation: Option<String>,
}

/// ESPN groups a roster by unit (offense, defense, special teams)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AthleteGroup {
    pub position: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<Athlete>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Athlete {
    pub id: Option<String>,
    pub full_name: Option<String>,
    pub display_name: Option<String>,
    pub jersey: Option<String>,
    pub position: Option<Position>,
    pub headshot: Option<Link>,
    pub age: Option<i64>,
    pub experience: Option<Experience>,
    pub college: Option<College>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Position {
    pub abbreviation: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Link {
    pub href: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub years: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct College {
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ScoreboardPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub events: Vec<Event>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Event {
    pub id: Option<String>,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub date: Option<String>,
    pub status: Option<EventStatus>,
    #[serde(deserialize_with = "null_as_default")]
    pub competitions: Vec<Competition>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EventStatus {
    #[serde(rename = "type")]
    pub kind: Option<StatusType>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatusType {
    pub state: Option<String>,
    pub completed: Option<bool>,
    pub description: Option<String>,
    pub short_detail: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Competition {
    #[serde(deserialize_with = "null_as_default")]
    pub competitors: Vec<Competitor>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Competitor {
    pub home_away: Option<String>,
    pub score: Option<String>,
    pub team: Option<CompetitorTeam>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompetitorTeam {
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub abbreviation: Option<String>,
    pub logo: Option<String>,
}
