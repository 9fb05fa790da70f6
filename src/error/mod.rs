use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum DashboardError {
    /// Upstream could not be reached (DNS, connect, reset, TLS)
    #[error("Network Error: {0}")]
    NetworkError(String),

    /// Upstream answered with a non-2xx status
    #[error("Upstream returned HTTP {status} for {url}")]
    UpstreamStatus { status: u16, url: String },

    /// Outbound request exceeded the configured timeout
    #[error("Timeout Error: {0}")]
    TimeoutError(String),

    /// Payload could not be decoded
    #[error("Parse Error: {0}")]
    ParseError(String),

    /// Payload decoded but lacks the fields we need
    #[error("Missing Data: {0}")]
    MissingData(String),

    /// Neither the next-event pointer nor the schedule produced a match
    #[error("No matches found")]
    NoMatchesFound,

    /// Article page has no content region
    #[error("Content Not Found: {0}")]
    ContentNotFound(String),

    /// Fetch failed and nothing was cached for this resource
    #[error("{resource} unavailable: {message}")]
    Unavailable {
        resource: &'static str,
        message: String,
    },

    /// Configuration errors
    #[error("Config Error: {0}")]
    ConfigError(String),
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return DashboardError::TimeoutError(err.to_string());
        }
        if let Some(status) = err.status() {
            return DashboardError::UpstreamStatus {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            };
        }
        if err.is_decode() {
            return DashboardError::ParseError(format!("Response body decode error: {}", err));
        }
        DashboardError::NetworkError(err.to_string())
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::ParseError(format!("JSON deserialization error: {}", err))
    }
}

impl From<url::ParseError> for DashboardError {
    fn from(err: url::ParseError) -> Self {
        DashboardError::NetworkError(format!("Invalid URL: {}", err))
    }
}

impl DashboardError {
    /// Transport-level failures may succeed on the next request; payload problems will not.
    pub fn is_recoverable(&self) -> bool {
        match self {
            DashboardError::NetworkError(_) => true,
            DashboardError::UpstreamStatus { status, .. } => *status >= 500 || *status == 429,
            DashboardError::TimeoutError(_) => true,
            DashboardError::ParseError(_) => false,
            DashboardError::MissingData(_) => false,
            DashboardError::NoMatchesFound => false,
            DashboardError::ContentNotFound(_) => false,
            DashboardError::Unavailable { .. } => true,
            DashboardError::ConfigError(_) => false,
        }
    }

    /// Categorizes error for the health report
    pub fn categorize(&self) -> ErrorCategory {
        match self {
            DashboardError::NetworkError(_)
            | DashboardError::UpstreamStatus { .. }
            | DashboardError::TimeoutError(_) => ErrorCategory::Upstream,
            DashboardError::ParseError(_)
            | DashboardError::MissingData(_)
            | DashboardError::NoMatchesFound => ErrorCategory::Payload,
            DashboardError::ContentNotFound(_) => ErrorCategory::Extraction,
            DashboardError::Unavailable { .. } => ErrorCategory::Cache,
            DashboardError::ConfigError(_) => ErrorCategory::Configuration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Upstream,
    Payload,
    Extraction,
    Cache,
    Configuration,
}

pub type Result<T> = std::result::Result<T, DashboardError>;
