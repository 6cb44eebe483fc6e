use super::Resolvers;
use crate::domain::{CacheKey, Resource};
use crate::models::{NflGame, NflPlayer};
use crate::normalize::nfl;
use futures::StreamExt;
use futures::stream;
use shared::{Error, Result};
use tracing::{debug, warn};

/// ESPN team ids for the 32 franchises. 31 and 32 are unassigned upstream.
pub const NFL_TEAM_IDS: [u32; 32] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26,
    27, 28, 29, 30, 33, 34,
];

const ROSTER_FANOUT: usize = 8;

impl Resolvers {
    /// League-wide roster, aggregated across every team in [`NFL_TEAM_IDS`] order
    pub async fn nfl_players(&self) -> Vec<NflPlayer> {
        let resource = Resource::NflRoster;
        let key = CacheKey::for_resource(resource, &[]);
        self.resolve(resource, key, || self.aggregate_rosters()).await
    }

    pub async fn nfl_scores(&self) -> Vec<NflGame> {
        let resource = Resource::NflScores;
        let key = CacheKey::for_resource(resource, &[]);
        self.resolve(resource, key, || async {
            let raw = self
                .fetch(resource, self.endpoints.nfl_scoreboard())
                .await?;
            nfl::scoreboard(raw)
        })
        .await
    }

    async fn aggregate_rosters(&self) -> Result<Vec<NflPlayer>> {
        let rosters: Vec<(u32, Result<Vec<NflPlayer>>)> = stream::iter(NFL_TEAM_IDS)
            .map(|team_id| async move {
                let roster = self.team_roster(team_id).await;
                (team_id, roster)
            })
            .buffered(ROSTER_FANOUT)
            .collect()
            .await;

        let mut players = Vec::new();
        let mut failed = 0;
        for (team_id, roster) in rosters {
            match roster {
                Ok(mut team) => players.append(&mut team),
                Err(e) => {
                    failed += 1;
                    warn!(team_id, error = %e, "skipping team roster");
                }
            }
        }

        if failed == NFL_TEAM_IDS.len() {
            return Err(Error::Upstream("every team roster failed".to_string()));
        }
        debug!(players = players.len(), failed, "aggregated league roster");
        Ok(players)
    }

    async fn team_roster(&self, team_id: u32) -> Result<Vec<NflPlayer>> {
        let raw = self
            .fetch(Resource::NflRoster, self.endpoints.nfl_roster(team_id))
            .await?;
        nfl::roster(raw)
    }
}
