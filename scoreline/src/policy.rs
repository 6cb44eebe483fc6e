//! Static per-resource policy: how long a payload lives and how its upstream is addressed.

use crate::domain::Resource;
use shared::TtlSecs;
use shared::config::UpstreamConfig;
use std::time::Duration;

/// Header set sent with an outbound request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeaderProfile {
    /// Browser-like user agent with a SofaScore referer/origin pair
    Browser,
    /// Plain service user agent
    Generic,
}

impl HeaderProfile {
    const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
    const GENERIC_UA: &str = concat!("scoreline/", env!("CARGO_PKG_VERSION"));

    pub fn headers(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            HeaderProfile::Browser => &[
                ("user-agent", Self::BROWSER_UA),
                ("referer", "https://www.sofascore.com/"),
                ("origin", "https://www.sofascore.com"),
                ("accept", "application/json, image/*;q=0.9, */*;q=0.8"),
            ],
            HeaderProfile::Generic => &[
                ("user-agent", Self::GENERIC_UA),
                ("accept", "application/json"),
            ],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourcePolicy {
    pub resource: Resource,
    pub ttl: TtlSecs,
    pub profile: HeaderProfile,
}

const LIVE_TTL: TtlSecs = TtlSecs(30);
const ROSTER_TTL: TtlSecs = TtlSecs(6 * 60 * 60);
const STANDINGS_TTL: TtlSecs = TtlSecs(60 * 60);
const NFL_ROSTER_TTL: TtlSecs = TtlSecs(12 * 60 * 60);

pub const POLICIES: [ResourcePolicy; 7] = [
    ResourcePolicy {
        resource: Resource::LiveScores,
        ttl: LIVE_TTL,
        profile: HeaderProfile::Browser,
    },
    ResourcePolicy {
        resource: Resource::Teams,
        ttl: ROSTER_TTL,
        profile: HeaderProfile::Browser,
    },
    ResourcePolicy {
        resource: Resource::Players,
        ttl: ROSTER_TTL,
        profile: HeaderProfile::Browser,
    },
    ResourcePolicy {
        resource: Resource::Standings,
        ttl: STANDINGS_TTL,
        profile: HeaderProfile::Browser,
    },
    ResourcePolicy {
        resource: Resource::Squad,
        ttl: ROSTER_TTL,
        profile: HeaderProfile::Browser,
    },
    ResourcePolicy {
        resource: Resource::NflRoster,
        ttl: NFL_ROSTER_TTL,
        profile: HeaderProfile::Generic,
    },
    ResourcePolicy {
        resource: Resource::NflScores,
        ttl: LIVE_TTL,
        profile: HeaderProfile::Generic,
    },
];

impl Resource {
    pub fn policy(&self) -> &'static ResourcePolicy {
        // POLICIES is declared in the same order as Resource::ALL
        &POLICIES[*self as usize]
    }

    pub fn ttl(&self) -> TtlSecs {
        self.policy().ttl
    }
}

/// Upstream URL builders
#[derive(Clone, Debug)]
pub struct Endpoints {
    config: UpstreamConfig,
}

impl Endpoints {
    pub fn new(config: UpstreamConfig) -> Self {
        Self { config }
    }

    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }

    pub fn live_events(&self) -> String {
        format!("{}/sport/football/events/live", self.config.sofascore_base_url)
    }

    pub fn seasons(&self, tournament_id: u32) -> String {
        format!(
            "{}/unique-tournament/{}/seasons",
            self.config.sofascore_base_url, tournament_id
        )
    }

    pub fn season_teams(&self, tournament_id: u32, season_id: i64) -> String {
        format!(
            "{}/unique-tournament/{}/season/{}/teams",
            self.config.sofascore_base_url, tournament_id, season_id
        )
    }

    pub fn standings(&self, tournament_id: u32, season_id: i64) -> String {
        format!(
            "{}/unique-tournament/{}/season/{}/standings/total",
            self.config.sofascore_base_url, tournament_id, season_id
        )
    }

    pub fn team_players(&self, team_id: u64) -> String {
        format!("{}/team/{}/players", self.config.sofascore_base_url, team_id)
    }

    pub fn team_logo(&self, team_id: i64) -> String {
        format!(
            "{}/team/{}/image",
            self.config.sofascore_image_base_url, team_id
        )
    }

    pub fn player_photo(&self, player_id: i64) -> String {
        format!(
            "{}/player/{}/image",
            self.config.sofascore_image_base_url, player_id
        )
    }

    pub fn nfl_roster(&self, team_id: u32) -> String {
        format!("{}/teams/{}/roster", self.config.espn_base_url, team_id)
    }

    pub fn nfl_scoreboard(&self) -> String {
        format!("{}/scoreboard", self.config.espn_base_url)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(UpstreamConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_table_matches_resources() {
        for resource in Resource::ALL {
            assert_eq!(resource.policy().resource, resource);
        }
    }

    #[test]
    fn test_ttl_table() {
        assert_eq!(Resource::LiveScores.ttl(), TtlSecs(30));
        assert_eq!(Resource::NflScores.ttl(), TtlSecs(30));
        assert_eq!(Resource::Teams.ttl(), TtlSecs(21_600));
        assert_eq!(Resource::Squad.ttl(), TtlSecs(21_600));
        assert_eq!(Resource::Players.ttl(), TtlSecs(21_600));
        assert_eq!(Resource::Standings.ttl(), TtlSecs(3_600));
        assert_eq!(Resource::NflRoster.ttl(), TtlSecs(43_200));
    }

    #[test]
    fn test_profiles_split_by_upstream() {
        assert_eq!(Resource::Standings.policy().profile, HeaderProfile::Browser);
        assert_eq!(Resource::NflScores.policy().profile, HeaderProfile::Generic);

        let browser = HeaderProfile::Browser.headers();
        assert!(browser.iter().any(|(name, _)| *name == "referer"));
        assert!(browser.iter().any(|(name, _)| *name == "origin"));
        assert!(
            !HeaderProfile::Generic
                .headers()
                .iter()
                .any(|(name, _)| *name == "referer")
        );
    }

    #[test]
    fn test_endpoints_compose_base_urls() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.standings(17, 61627),
            "https://api.sofascore.com/api/v1/unique-tournament/17/season/61627/standings/total"
        );
        assert_eq!(
            endpoints.team_logo(10),
            "https://api.sofascore.app/api/v1/team/10/image"
        );
        assert_eq!(
            endpoints.nfl_roster(33),
            "https://site.api.espn.com/apis/site/v2/sports/football/nfl/teams/33/roster"
        );
    }
}
