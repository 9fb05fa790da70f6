use std::sync::Arc;

use crate::cache::{CacheStatus, CachedResource, Fetcher, TtlPolicy};
use crate::config::Config;
use crate::error::Result;
use crate::football::{MatchFetcher, MatchPayload, StandingsFetcher, StandingsPayload};
use crate::upstream::{NewsFetcher, UpstreamClient};

pub const NEWS_UNAVAILABLE: &str = "No news available at the moment";
pub const STANDINGS_UNAVAILABLE: &str = "Standings unavailable";
pub const MATCHES_UNAVAILABLE: &str = "Match data unavailable";

/// The fetchers behind the three cached resources
pub struct Fetchers {
    pub news: Arc<dyn Fetcher<String>>,
    pub standings: Arc<dyn Fetcher<StandingsPayload>>,
    pub matches: Arc<dyn Fetcher<MatchPayload>>,
}

impl Fetchers {
    /// Fetchers that talk to the configured upstream endpoints
    pub fn upstream(config: &Config, client: Arc<UpstreamClient>) -> Self {
        Self {
            news: Arc::new(NewsFetcher::new(client.clone(), config.rss_url.clone())),
            standings: Arc::new(StandingsFetcher::new(
                client.clone(),
                config.espn_standings_url.clone(),
                config.target_team.clone(),
            )),
            matches: Arc::new(MatchFetcher::new(
                client,
                config.team_url(),
                config.schedule_url(),
                config.competition_name.clone(),
            )),
        }
    }
}

/// Process-scoped context shared by every request handler
pub struct AppState {
    pub config: Arc<Config>,
    pub client: Arc<UpstreamClient>,
    pub news: CachedResource<String>,
    pub standings: CachedResource<StandingsPayload>,
    pub matches: CachedResource<MatchPayload>,
}

impl AppState {
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let client = Arc::new(UpstreamClient::new(config.upstream_timeout())?);
        let fetchers = Fetchers::upstream(&config, client.clone());
        Ok(Self::with_fetchers(config, client, fetchers))
    }

    pub fn with_fetchers(
        config: Arc<Config>,
        client: Arc<UpstreamClient>,
        fetchers: Fetchers,
    ) -> Self {
        Self {
            news: CachedResource::new(
                "news",
                NEWS_UNAVAILABLE,
                fetchers.news,
                TtlPolicy::news(&config),
            ),
            standings: CachedResource::new(
                "standings",
                STANDINGS_UNAVAILABLE,
                fetchers.standings,
                TtlPolicy::standings(&config),
            ),
            matches: CachedResource::new(
                "matches",
                MATCHES_UNAVAILABLE,
                fetchers.matches,
                TtlPolicy::matches(&config),
            ),
            config,
            client,
        }
    }

    pub async fn cache_statuses(&self) -> Vec<CacheStatus> {
        vec![
            self.news.status().await,
            self.standings.status().await,
            self.matches.status().await,
        ]
    }
}
