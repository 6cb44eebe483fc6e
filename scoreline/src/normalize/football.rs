use super::or_unknown;
use crate::models::{MatchSummary, Player, Squad, StandingRow, Team};
use crate::policy::Endpoints;
use crate::wire::decode;
use crate::wire::sofascore::{
    EventsPayload, PlayerRaw, PlayersPayload, SeasonsPayload, StandingsPayload, TeamRef,
    TeamsPayload,
};
use serde_json::Value;
use shared::{Error, Result};
use tracing::debug;

/// SofaScore status codes for a match in play (first and second half)
pub const LIVE_STATUS_CODES: [i64; 2] = [6, 7];

pub fn live_scores(raw: Value, endpoints: &Endpoints) -> Result<Vec<MatchSummary>> {
    let payload: EventsPayload = decode(raw)?;

    Ok(payload
        .events
        .into_iter()
        .map(|event| {
            let home = event.home_team.unwrap_or_default();
            let away = event.away_team.unwrap_or_default();
            let status = event.status.unwrap_or_default();

            MatchSummary {
                id: event.id,
                home_logo: home.id.map(|id| endpoints.team_logo(id)),
                away_logo: away.id.map(|id| endpoints.team_logo(id)),
                home_team: or_unknown(home.name),
                away_team: or_unknown(away.name),
                home_team_id: home.id,
                away_team_id: away.id,
                home_score: event.home_score.and_then(|s| s.current),
                away_score: event.away_score.and_then(|s| s.current),
                is_live: status
                    .code
                    .is_some_and(|code| LIVE_STATUS_CODES.contains(&code)),
                status: status
                    .description
                    .or(status.kind)
                    .unwrap_or_else(|| "Not started".to_string()),
                status_code: status.code,
                tournament: or_unknown(event.tournament.and_then(|t| t.name)),
                start_timestamp: event.start_timestamp,
            }
        })
        .collect())
}

/// First listed season is the current one
pub fn current_season(raw: Value) -> Result<i64> {
    let payload: SeasonsPayload = decode(raw)?;
    payload
        .seasons
        .into_iter()
        .find_map(|season| season.id)
        .ok_or_else(|| Error::Decode("no season with an id".to_string()))
}

pub fn teams(raw: Value, endpoints: &Endpoints) -> Result<Vec<Team>> {
    let payload: TeamsPayload = decode(raw)?;
    Ok(payload
        .teams
        .into_iter()
        .map(|team| team_from(team, endpoints))
        .collect())
}

fn team_from(team: TeamRef, endpoints: &Endpoints) -> Team {
    Team {
        id: team.id,
        logo: team.id.map(|id| endpoints.team_logo(id)),
        name: or_unknown(team.name),
        short_name: team.short_name,
    }
}

/// Rows of the first (overall) table, in upstream order
pub fn standings(raw: Value, endpoints: &Endpoints) -> Result<Vec<StandingRow>> {
    let payload: StandingsPayload = decode(raw)?;
    let Some(table) = payload.standings.into_iter().next() else {
        return Ok(Vec::new());
    };

    Ok(table
        .rows
        .into_iter()
        .map(|row| {
            let team = row.team.unwrap_or_default();
            let goals_for = row.scores_for.unwrap_or(0);
            let goals_against = row.scores_against.unwrap_or(0);
            StandingRow {
                position: row.position,
                team_id: team.id,
                logo: team.id.map(|id| endpoints.team_logo(id)),
                team: or_unknown(team.name),
                played: row.matches.unwrap_or(0),
                won: row.wins.unwrap_or(0),
                drawn: row.draws.unwrap_or(0),
                lost: row.losses.unwrap_or(0),
                goals_for,
                goals_against,
                goal_difference: goals_for.saturating_sub(goals_against),
                points: row.points.unwrap_or(0),
            }
        })
        .collect())
}

pub fn players(raw: Value, endpoints: &Endpoints) -> Result<Vec<Player>> {
    let payload: PlayersPayload = decode(raw)?;
    Ok(payload
        .players
        .into_iter()
        .filter_map(|entry| entry.player)
        .map(|player| player_from(player, endpoints))
        .collect())
}

fn player_from(player: PlayerRaw, endpoints: &Endpoints) -> Player {
    Player {
        id: player.id,
        photo: player.id.map(|id| endpoints.player_photo(id)),
        name: or_unknown(player.name.or(player.short_name)),
        position: player.position,
        shirt_number: player
            .jersey_number
            .or_else(|| player.shirt_number.map(|n| n.to_string())),
        nationality: player.country.and_then(|c| c.name),
        date_of_birth_timestamp: player.date_of_birth_timestamp,
    }
}

/// Same upstream as [`players`], grouped by SofaScore position code
pub fn squad(raw: Value, endpoints: &Endpoints) -> Result<Squad> {
    let mut squad = Squad::default();
    for player in players(raw, endpoints)? {
        let group = match player.position.as_deref() {
            Some("G") => &mut squad.goalkeepers,
            Some("D") => &mut squad.defenders,
            Some("M") => &mut squad.midfielders,
            Some("F") => &mut squad.forwards,
            other => {
                debug!(position = ?other, player = %player.name, "player without a squad group");
                continue;
            }
        };
        group.push(player);
    }
    Ok(squad)
}
