pub mod settings;

pub use settings::Config;

use crate::error::DashboardError;
use std::sync::Arc;

/// Loads the application configuration as an `Arc<Config>`.
///
/// A `.env` file in the working directory is honored if present. Values that parse but make no
/// sense (hours past 23, a zero timeout, blank upstream URLs) are rejected here rather than at
/// the first request.
pub fn load_config() -> Result<Arc<Config>, DashboardError> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    validate(&config)?;

    Ok(Arc::new(config))
}

pub fn validate(config: &Config) -> Result<(), DashboardError> {
    if config.active_hours_start > 23 || config.active_hours_end > 23 {
        return Err(DashboardError::ConfigError(format!(
            "ACTIVE_HOURS_START/END must be within 0..=23 (got {}..={})",
            config.active_hours_start, config.active_hours_end
        )));
    }
    if config.upstream_timeout_secs == 0 {
        return Err(DashboardError::ConfigError(
            "UPSTREAM_TIMEOUT_SECS cannot be zero".to_string(),
        ));
    }
    for (name, value) in [
        ("RSS_URL", &config.rss_url),
        ("WEATHER_API_URL", &config.weather_api_url),
        ("ESPN_SITE_API_BASE", &config.espn_site_api_base),
        ("ESPN_STANDINGS_URL", &config.espn_standings_url),
    ] {
        if value.trim().is_empty() {
            return Err(DashboardError::ConfigError(format!("{name} cannot be empty")));
        }
    }
    if config.target_team.trim().is_empty() {
        return Err(DashboardError::ConfigError(
            "TARGET_TEAM cannot be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::test_default()).is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_hours() {
        let mut config = Config::test_default();
        config.active_hours_end = 24;
        assert!(matches!(
            validate(&config),
            Err(DashboardError::ConfigError(_))
        ));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = Config::test_default();
        config.upstream_timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_espn_urls_include_team_id() {
        let config = Config::test_default();
        assert!(config.team_url().ends_with("/teams/142"));
        assert!(config.schedule_url().ends_with("/teams/142/schedule"));
    }
}
