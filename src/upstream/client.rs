//! Fetch gateway: the one place outbound HTTP requests are made.

use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::error::{DashboardError, Result};
use crate::utils::Timer;

const USER_AGENT: &str = "club-dashboard/0.1";
const SLOW_RESPONSE: Duration = Duration::from_secs(2);

/// Thin wrapper over a shared `reqwest::Client` with a request timeout.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
}

impl UpstreamClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DashboardError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// GET `url` and return the body as text. Any non-2xx status is an error.
    pub async fn get_text(&self, url: &str) -> Result<String> {
        let url = Url::parse(url)?;
        debug!("🔍 GET {}", url);

        let timer = Timer::start(format!("GET {}", url.path()));
        let response = self.client.get(url.clone()).send().await?;
        timer.finish_with_threshold(SLOW_RESPONSE);

        if !response.status().is_success() {
            return Err(DashboardError::UpstreamStatus {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }

    /// GET `url` and decode a 2xx JSON body into `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.get_text(url).await?;
        serde_json::from_str(&body).map_err(|e| {
            DashboardError::ParseError(format!("Failed to parse response from {}: {}", url, e))
        })
    }

    /// GET `url` and return its JSON body whatever the status code. Used by the proxy routes
    /// that hand the upstream answer to the browser verbatim.
    pub async fn get_json_value(&self, url: Url) -> Result<serde_json::Value> {
        debug!("🔍 GET {} (proxied)", url.path());

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let value = response.json::<serde_json::Value>().await?;

        if !status.is_success() {
            debug!("Proxied upstream answered {}", status);
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_url_is_error() {
        let client = UpstreamClient::new(Duration::from_secs(1)).unwrap();
        let result = client.get_text("not a url").await;
        assert!(matches!(result, Err(DashboardError::NetworkError(_))));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_recoverable_error() {
        let client = UpstreamClient::new(Duration::from_secs(2)).unwrap();
        // Port 9 (discard) on loopback is closed on any sane test box.
        let err = client.get_text("http://127.0.0.1:9/feed.xml").await.unwrap_err();
        assert!(err.is_recoverable(), "unexpected error: {err}");
    }
}
