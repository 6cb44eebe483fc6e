use super::Resolvers;
use crate::domain::{CacheKey, League, Resource};
use crate::models::{MatchSummary, Player, Squad, StandingRow, Team};
use crate::normalize::football;
use shared::Result;

impl Resolvers {
    pub async fn live_scores(&self) -> Vec<MatchSummary> {
        let resource = Resource::LiveScores;
        let key = CacheKey::for_resource(resource, &[]);
        self.resolve(resource, key, || async {
            let raw = self.fetch(resource, self.endpoints.live_events()).await?;
            football::live_scores(raw, &self.endpoints)
        })
        .await
    }

    pub async fn teams(&self, league: League) -> Vec<Team> {
        let resource = Resource::Teams;
        let key = CacheKey::for_resource(resource, &[league.code()]);
        self.resolve(resource, key, || async {
            let tournament = league.tournament_id();
            let season = self.current_season(resource, league).await?;
            let raw = self
                .fetch(resource, self.endpoints.season_teams(tournament, season))
                .await?;
            football::teams(raw, &self.endpoints)
        })
        .await
    }

    pub async fn players(&self, team_id: u64) -> Vec<Player> {
        let resource = Resource::Players;
        let key = CacheKey::for_resource(resource, &[&team_id.to_string()]);
        self.resolve(resource, key, || async {
            let raw = self
                .fetch(resource, self.endpoints.team_players(team_id))
                .await?;
            football::players(raw, &self.endpoints)
        })
        .await
    }

    pub async fn standings(&self, league: League) -> Vec<StandingRow> {
        let resource = Resource::Standings;
        let key = CacheKey::for_resource(resource, &[league.code()]);
        self.resolve(resource, key, || async {
            let tournament = league.tournament_id();
            let season = self.current_season(resource, league).await?;
            let raw = self
                .fetch(resource, self.endpoints.standings(tournament, season))
                .await?;
            football::standings(raw, &self.endpoints)
        })
        .await
    }

    pub async fn squad(&self, team_id: u64) -> Squad {
        let resource = Resource::Squad;
        let key = CacheKey::for_resource(resource, &[&team_id.to_string()]);
        self.resolve(resource, key, || async {
            let raw = self
                .fetch(resource, self.endpoints.team_players(team_id))
                .await?;
            football::squad(raw, &self.endpoints)
        })
        .await
    }

    /// First step of the two-step resolvers; not cached on its own
    async fn current_season(&self, resource: Resource, league: League) -> Result<i64> {
        let raw = self
            .fetch(resource, self.endpoints.seasons(league.tournament_id()))
            .await?;
        football::current_season(raw)
    }
}
