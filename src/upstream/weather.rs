use serde_json::Value;
use url::Url;

use super::client::UpstreamClient;
use crate::error::{DashboardError, Result};

/// Builds the weatherapi.com current-conditions URL for `city`.
pub fn weather_url(base: &str, api_key: &str, city: &str) -> Result<Url> {
    Ok(Url::parse_with_params(
        base,
        &[("key", api_key), ("q", city), ("aqi", "no")],
    )?)
}

/// Current weather for `city`, passed through untouched. No caching.
pub async fn fetch_weather(
    client: &UpstreamClient,
    base: &str,
    api_key: Option<&str>,
    city: &str,
) -> Result<Value> {
    let api_key = api_key
        .ok_or_else(|| DashboardError::ConfigError("WEATHER_API_KEY is not set".to_string()))?;
    let url = weather_url(base, api_key, city)?;
    client.get_json_value(url).await
}
