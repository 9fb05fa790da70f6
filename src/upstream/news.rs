use async_trait::async_trait;
use std::sync::Arc;

use super::client::UpstreamClient;
use crate::cache::Fetcher;
use crate::error::{DashboardError, Result};

/// Fetches the news sitemap feed as raw XML. Parsing happens in the browser.
pub struct NewsFetcher {
    client: Arc<UpstreamClient>,
    feed_url: String,
}

impl NewsFetcher {
    pub fn new(client: Arc<UpstreamClient>, feed_url: impl Into<String>) -> Self {
        Self {
            client,
            feed_url: feed_url.into(),
        }
    }
}

#[async_trait]
impl Fetcher<String> for NewsFetcher {
    async fn fetch(&self) -> Result<String> {
        let body = self.client.get_text(&self.feed_url).await?;
        // An empty feed is never cached; it takes the failure path like any bad payload.
        if body.trim().is_empty() {
            return Err(DashboardError::MissingData("Empty RSS feed".to_string()));
        }
        Ok(body)
    }
}
