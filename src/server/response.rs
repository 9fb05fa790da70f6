//! Mapping failures onto the bodies the dashboard front end expects.
//!
//! Cached resources answer with a JSON body carrying `fallback: true` so the page can render its
//! placeholder. The uncached proxy routes answer with plain text.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use crate::error::DashboardError;

pub const RSS_ERROR: &str = "Error fetching RSS feed";
pub const STANDINGS_ERROR: &str = "Error fetching standings";
pub const MATCHES_ERROR: &str = "Error fetching matches";
pub const WEATHER_ERROR: &str = "Error fetching weather data";
pub const ARTICLE_ERROR: &str = "Error fetching article";
pub const ARTICLE_NOT_FOUND: &str = "Article content not found";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FallbackBody {
    pub error: &'static str,
    pub fallback: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 500 with a `{error, fallback, message}` JSON body
    Fallback(FallbackBody),
    /// Plain-text body with the given status
    Plain {
        status: StatusCode,
        body: &'static str,
    },
}

impl ApiError {
    /// Failure of a cached resource. The message is the resource's own placeholder text when the
    /// cache was empty, otherwise the error itself.
    pub fn fallback(error: &'static str, err: DashboardError) -> Self {
        let message = match err {
            DashboardError::Unavailable { message, .. } => message,
            other => other.to_string(),
        };
        ApiError::Fallback(FallbackBody {
            error,
            fallback: true,
            message,
        })
    }

    pub fn internal(body: &'static str) -> Self {
        ApiError::Plain {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body,
        }
    }

    pub fn not_found(body: &'static str) -> Self {
        ApiError::Plain {
            status: StatusCode::NOT_FOUND,
            body,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Fallback(body) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
            ApiError::Plain { status, body } => (status, body).into_response(),
        }
    }
}

/// Raw feed body with an XML content type
pub fn xml(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/xml")], body).into_response()
}
