use super::or_unknown;
use crate::models::{NflGame, NflPlayer};
use crate::wire::decode;
use crate::wire::espn::{Competitor, RosterPayload, ScoreboardPayload};
use serde_json::Value;
use shared::Result;

/// One team's roster, flattened across offense/defense/special teams
pub fn roster(raw: Value) -> Result<Vec<NflPlayer>> {
    let payload: RosterPayload = decode(raw)?;
    let team = payload.team.unwrap_or_default();

    Ok(payload
        .athletes
        .into_iter()
        .flat_map(|group| group.items)
        .map(|athlete| NflPlayer {
            id: athlete.id,
            name: or_unknown(athlete.full_name.or(athlete.display_name)),
            jersey: athlete.jersey,
            position: athlete
                .position
                .and_then(|p| p.abbreviation.or(p.name)),
            team: team.display_name.clone(),
            team_abbreviation: team.abbreviation.clone(),
            headshot: athlete.headshot.and_then(|h| h.href),
            age: athlete.age,
            experience_years: athlete.experience.and_then(|e| e.years),
            college: athlete.college.and_then(|c| c.name),
        })
        .collect())
}

pub fn scoreboard(raw: Value) -> Result<Vec<NflGame>> {
    let payload: ScoreboardPayload = decode(raw)?;

    Ok(payload
        .events
        .into_iter()
        .map(|event| {
            let status = event.status.and_then(|s| s.kind).unwrap_or_default();
            let mut home = None;
            let mut away = None;
            for competitor in event
                .competitions
                .into_iter()
                .next()
                .map(|c| c.competitors)
                .unwrap_or_default()
            {
                let home_away = competitor.home_away.clone().unwrap_or_default();
                match home_away.as_str() {
                    "home" => home = Some(competitor),
                    "away" => away = Some(competitor),
                    _ => {}
                }
            }
            let home = side(home);
            let away = side(away);

            NflGame {
                id: event.id,
                name: or_unknown(event.name),
                short_name: event.short_name,
                home_team: home.name,
                away_team: away.name,
                home_abbreviation: home.abbreviation,
                away_abbreviation: away.abbreviation,
                home_score: home.score,
                away_score: away.score,
                is_live: status.state.as_deref() == Some("in"),
                completed: status.completed.unwrap_or(false),
                status: status
                    .description
                    .unwrap_or_else(|| "Scheduled".to_string()),
                detail: status.short_detail,
                start_time: event.date,
                home_logo: home.logo,
                away_logo: away.logo,
            }
        })
        .collect())
}

struct Side {
    name: String,
    abbreviation: Option<String>,
    score: Option<i64>,
    logo: Option<String>,
}

fn side(competitor: Option<Competitor>) -> Side {
    let competitor = competitor.unwrap_or_default();
    let team = competitor.team.unwrap_or_default();
    Side {
        name: or_unknown(team.display_name),
        abbreviation: team.abbreviation,
        // ESPN sends scores as strings
        score: competitor.score.and_then(|s| s.trim().parse().ok()),
        logo: team.logo,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_roster_flattens_groups() {
        let raw = json!({
            "team": {"displayName": "Baltimore Ravens", "abbreviation": "BAL"},
            "athletes": [
                {"position": "offense", "items": [
                    {"id": "3916387", "fullName": "Lamar Jackson", "jersey": "8",
                     "position": {"abbreviation": "QB"}, "headshot": {"href": "https://a.espncdn.com/lamar.png"},
                     "experience": {"years": 7}, "college": {"name": "Louisville"}}
                ]},
                {"position": "defense", "items": [{"displayName": "Roquan Smith"}]},
                {"position": "specialTeam", "items": null}
            ]
        });
        let players = roster(raw).unwrap();

        assert_eq!(players.len(), 2);
        assert_eq!(players[0].name, "Lamar Jackson");
        assert_eq!(players[0].position.as_deref(), Some("QB"));
        assert_eq!(players[0].experience_years, Some(7));
        assert_eq!(players[0].team_abbreviation.as_deref(), Some("BAL"));
        assert_eq!(players[1].name, "Roquan Smith");
        assert_eq!(players[1].team.as_deref(), Some("Baltimore Ravens"));
    }

    #[test]
    fn test_scoreboard_sides_and_live_state() {
        let raw = json!({"events": [{
            "id": "401671789",
            "name": "Kansas City Chiefs at Baltimore Ravens",
            "shortName": "KC @ BAL",
            "date": "2024-09-06T00:20Z",
            "status": {"type": {"state": "in", "completed": false, "description": "In Progress", "shortDetail": "Q3 4:12"}},
            "competitions": [{"competitors": [
                {"homeAway": "home", "score": "17", "team": {"displayName": "Baltimore Ravens", "abbreviation": "BAL", "logo": "bal.png"}},
                {"homeAway": "away", "score": "20", "team": {"displayName": "Kansas City Chiefs", "abbreviation": "KC"}}
            ]}]
        }]});
        let games = scoreboard(raw).unwrap();

        assert_eq!(games.len(), 1);
        let game = &games[0];
        assert_eq!(game.home_team, "Baltimore Ravens");
        assert_eq!(game.away_team, "Kansas City Chiefs");
        assert_eq!(game.home_score, Some(17));
        assert_eq!(game.away_score, Some(20));
        assert!(game.is_live);
        assert!(!game.completed);
        assert_eq!(game.detail.as_deref(), Some("Q3 4:12"));
        assert_eq!(game.home_logo.as_deref(), Some("bal.png"));
    }

    #[test]
    fn test_scoreboard_without_competitions() {
        let games = scoreboard(json!({"events": [{"id": "1"}]})).unwrap();
        assert_eq!(games[0].home_team, "Unknown");
        assert_eq!(games[0].status, "Scheduled");
        assert_eq!(games[0].home_score, None);
        assert!(!games[0].is_live);
    }

    #[test]
    fn test_normalization_is_byte_identical() {
        let roster_raw = json!({
            "team": {"displayName": "Baltimore Ravens", "abbreviation": "BAL"},
            "athletes": [{"position": "offense", "items": [
                {"id": "3916387", "fullName": "Lamar Jackson", "jersey": "8", "position": {"abbreviation": "QB"}}
            ]}]
        });
        let a = serde_json::to_vec(&roster(roster_raw.clone()).unwrap()).unwrap();
        let b = serde_json::to_vec(&roster(roster_raw).unwrap()).unwrap();
        assert_eq!(a, b);

        let scoreboard_raw = json!({"events": [{
            "id": "401671789",
            "status": {"type": {"state": "post", "completed": true, "description": "Final"}},
            "competitions": [{"competitors": [
                {"homeAway": "home", "score": "27", "team": {"displayName": "Baltimore Ravens"}},
                {"homeAway": "away", "score": "20", "team": {"displayName": "Kansas City Chiefs"}}
            ]}]
        }]});
        let a = serde_json::to_vec(&scoreboard(scoreboard_raw.clone()).unwrap()).unwrap();
        let b = serde_json::to_vec(&scoreboard(scoreboard_raw).unwrap()).unwrap();
        assert_eq!(a, b);
    }
}
