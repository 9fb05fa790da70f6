//! Article teaser extraction
//!
//! The dashboard shows only the opening paragraph of a news article. The page is fetched on
//! demand, never cached, and a page without the content region is reported as such instead of
//! being retried.

use log::debug;
use scraper::{Html, Selector};

use super::client::UpstreamClient;
use crate::error::{DashboardError, Result};

const CONTENT_REGION: &str = "#article-content";
const PARAGRAPH: &str = "p";

/// First paragraph of the content region, re-wrapped in `<p>` tags. An empty string when the
/// region exists but holds no paragraph; `ContentNotFound` when the region is missing.
pub fn extract_first_paragraph(html: &str) -> Result<String> {
    let region_selector = selector(CONTENT_REGION)?;
    let paragraph_selector = selector(PARAGRAPH)?;

    let document = Html::parse_document(html);
    let region = document
        .select(&region_selector)
        .next()
        .ok_or_else(|| DashboardError::ContentNotFound(CONTENT_REGION.to_string()))?;

    Ok(region
        .select(&paragraph_selector)
        .next()
        .map(|p| format!("<p>{}</p>", p.inner_html()))
        .unwrap_or_default())
}

pub async fn fetch_article_content(client: &UpstreamClient, url: &str) -> Result<String> {
    let html = client.get_text(url).await?;
    debug!("Fetched article page ({} bytes)", html.len());
    extract_first_paragraph(&html)
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| DashboardError::ParseError(format!("Bad selector {css}: {e}")))
}
