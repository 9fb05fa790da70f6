/// Upstream data sources
///
/// - `client`: shared HTTP client with timeout, status and decode handling
/// - `espn`: ESPN site API response shapes
/// - `news`: RSS feed fetcher
/// - `weather`: weatherapi.com proxy
/// - `article`: on-demand article teaser extraction
pub mod article;
pub mod client;
pub mod espn;
pub mod news;
pub mod weather;

pub use client::UpstreamClient;
pub use news::NewsFetcher;
