use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub static_dir: String,
    pub log_level: String,
    pub upstream_timeout_secs: u64,
    pub rss_url: String,
    pub weather_api_url: String,
    pub weather_api_key: Option<String>,
    pub espn_site_api_base: String,
    pub espn_standings_url: String,
    pub team_id: u32,
    pub target_team: String,
    pub competition_name: String,
    pub news_cache_ttl_secs: u64,
    pub standings_cache_ttl_secs: u64,
    pub matches_cache_ttl_secs: u64,
    pub matches_active_cache_ttl_secs: u64,
    pub active_hours_start: u32,
    pub active_hours_end: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "public".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            upstream_timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            rss_url: env::var("RSS_URL")
                .unwrap_or_else(|_| "https://www.fr12.nl/sitemap/news.xml".to_string()),
            weather_api_url: env::var("WEATHER_API_URL")
                .unwrap_or_else(|_| "http://api.weatherapi.com/v1/current.json".to_string()),
            weather_api_key: env::var("WEATHER_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            espn_site_api_base: env::var("ESPN_SITE_API_BASE").unwrap_or_else(|_| {
                "https://site.api.espn.com/apis/site/v2/sports/soccer/ned.1".to_string()
            }),
            espn_standings_url: env::var("ESPN_STANDINGS_URL").unwrap_or_else(|_| {
                "https://site.api.espn.com/apis/v2/sports/soccer/ned.1/standings".to_string()
            }),
            team_id: env::var("TEAM_ID").ok().and_then(|v| v.parse().ok()).unwrap_or(142),
            target_team: env::var("TARGET_TEAM").unwrap_or_else(|_| "Feyenoord".to_string()),
            competition_name: env::var("COMPETITION_NAME")
                .unwrap_or_else(|_| "Eredivisie".to_string()),
            news_cache_ttl_secs: env::var("NEWS_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            standings_cache_ttl_secs: env::var("STANDINGS_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1800),
            matches_cache_ttl_secs: env::var("MATCHES_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            matches_active_cache_ttl_secs: env::var("MATCHES_ACTIVE_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            active_hours_start: env::var("ACTIVE_HOURS_START")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(12),
            active_hours_end: env::var("ACTIVE_HOURS_END")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(23),
        }
    }

    /// Fixed configuration for tests; never touches the process environment.
    pub fn test_default() -> Self {
        Config {
            port: 0,
            static_dir: "public".to_string(),
            log_level: "debug".to_string(),
            upstream_timeout_secs: 2,
            rss_url: "http://127.0.0.1:9/news.xml".to_string(),
            weather_api_url: "http://127.0.0.1:9/v1/current.json".to_string(),
            weather_api_key: None,
            espn_site_api_base: "http://127.0.0.1:9/apis/site/v2/sports/soccer/ned.1".to_string(),
            espn_standings_url: "http://127.0.0.1:9/apis/v2/sports/soccer/ned.1/standings"
                .to_string(),
            team_id: 142,
            target_team: "Feyenoord".to_string(),
            competition_name: "Eredivisie".to_string(),
            news_cache_ttl_secs: 300,
            standings_cache_ttl_secs: 1800,
            matches_cache_ttl_secs: 300,
            matches_active_cache_ttl_secs: 60,
            active_hours_start: 12,
            active_hours_end: 23,
        }
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn team_url(&self) -> String {
        format!("{}/teams/{}", self.espn_site_api_base, self.team_id)
    }

    pub fn schedule_url(&self) -> String {
        format!("{}/teams/{}/schedule", self.espn_site_api_base, self.team_id)
    }

    pub fn validate_and_log(&self) {
        // The weather key is a secret; only log whether it is present.
        log::info!(
            "Configuration loaded: port={}, static_dir={}, team_id={}, target_team={}, \
             ttl(news={}s, standings={}s, matches={}s/{}s active), active_hours={}..={}, \
             upstream_timeout={}s, weather_key_set={}",
            self.port,
            self.static_dir,
            self.team_id,
            self.target_team,
            self.news_cache_ttl_secs,
            self.standings_cache_ttl_secs,
            self.matches_cache_ttl_secs,
            self.matches_active_cache_ttl_secs,
            self.active_hours_start,
            self.active_hours_end,
            self.upstream_timeout_secs,
            self.weather_api_key.is_some()
        );
        if self.weather_api_key.is_none() {
            log::warn!("WEATHER_API_KEY not set, /weather will answer with 500");
        }
    }
}
