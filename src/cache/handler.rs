//! Cached Resource Handler
//!
//! Puts one upstream resource behind a [`CacheCell`]: serve fresh values from the cell, refresh
//! on a miss, and fall back to whatever was last fetched when the refresh fails. Only when the
//! cell has never held a value does a failed fetch reach the caller.

use async_trait::async_trait;
use log::{debug, error, info, warn};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::cell::CacheCell;
use super::policy::TtlPolicy;
use crate::error::{DashboardError, ErrorCategory};

/// Produces a fresh value for one resource. One call is one upstream round trip.
#[async_trait]
pub trait Fetcher<T>: Send + Sync {
    async fn fetch(&self) -> Result<T, DashboardError>;
}

/// Where the returned value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Freshness {
    /// Served from the cell within TTL, no upstream call
    Hit,
    /// Fetched just now
    Refreshed,
    /// Refresh failed, served an expired value
    Stale,
}

#[derive(Debug, Clone)]
pub struct CachedResponse<T> {
    pub value: T,
    pub freshness: Freshness,
}

impl<T> CachedResponse<T> {
    pub fn is_degraded(&self) -> bool {
        self.freshness == Freshness::Stale
    }
}

/// Counters for monitoring
#[derive(Debug, Clone, Default)]
pub struct CacheMetrics {
    pub hits: u64,
    pub misses: u64,
    pub stale_served: u64,
    pub failures: u64,
    pub last_error: Option<String>,
    pub last_error_category: Option<ErrorCategory>,
}

impl CacheMetrics {
    /// Calculate cache hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Snapshot of one cached resource for the health endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatus {
    pub resource: &'static str,
    pub has_value: bool,
    pub age_secs: Option<u64>,
    pub ttl_secs: u64,
    pub hits: u64,
    pub misses: u64,
    pub stale_served: u64,
    pub failures: u64,
    pub hit_rate: f64,
    pub last_error: Option<String>,
    pub last_error_category: Option<ErrorCategory>,
}

pub struct CachedResource<T> {
    name: &'static str,
    unavailable_message: &'static str,
    fetcher: Arc<dyn Fetcher<T>>,
    policy: TtlPolicy,
    cell: CacheCell<T>,
    metrics: Mutex<CacheMetrics>,
}

impl<T: Clone + Send + Sync> CachedResource<T> {
    pub fn new(
        name: &'static str,
        unavailable_message: &'static str,
        fetcher: Arc<dyn Fetcher<T>>,
        policy: TtlPolicy,
    ) -> Self {
        info!(
            "🗄️  Initializing {} cache (TTL now: {}s)",
            name,
            policy.current_ttl().as_secs()
        );

        Self {
            name,
            unavailable_message,
            fetcher,
            policy,
            cell: CacheCell::new(),
            metrics: Mutex::new(CacheMetrics::default()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub async fn get(&self) -> Result<CachedResponse<T>, DashboardError> {
        let ttl = self.policy.current_ttl();

        if let Some(value) = self.cell.fresh(ttl).await {
            self.metrics.lock().await.hits += 1;
            debug!("🎯 Serving {} from cache", self.name);
            return Ok(CachedResponse {
                value,
                freshness: Freshness::Hit,
            });
        }

        self.metrics.lock().await.misses += 1;
        debug!("📡 Cache miss for {}, fetching upstream", self.name);

        match self.fetcher.fetch().await {
            Ok(value) => {
                self.cell.set(value.clone()).await;
                info!("✅ Refreshed {} from upstream", self.name);
                Ok(CachedResponse {
                    value,
                    freshness: Freshness::Refreshed,
                })
            }
            Err(e) => {
                if e.is_recoverable() {
                    warn!("⚠️ Fetching {} failed: {}", self.name, e);
                } else {
                    error!("❌ Fetching {} failed: {}", self.name, e);
                }
                self.record_failure(&e).await;

                match self.cell.get().await {
                    Some(value) => {
                        self.metrics.lock().await.stale_served += 1;
                        warn!("Serving stale {} cache due to error", self.name);
                        Ok(CachedResponse {
                            value,
                            freshness: Freshness::Stale,
                        })
                    }
                    None => Err(DashboardError::Unavailable {
                        resource: self.name,
                        message: self.unavailable_message.to_string(),
                    }),
                }
            }
        }
    }

    async fn record_failure(&self, err: &DashboardError) {
        let mut metrics = self.metrics.lock().await;
        metrics.failures += 1;
        metrics.last_error = Some(err.to_string());
        metrics.last_error_category = Some(err.categorize());
    }

    pub async fn get_metrics(&self) -> CacheMetrics {
        self.metrics.lock().await.clone()
    }

    pub async fn status(&self) -> CacheStatus {
        let metrics = self.get_metrics().await;
        CacheStatus {
            resource: self.name,
            has_value: self.cell.has_value().await,
            age_secs: self.cell.peek_age().await.map(|age| age.as_secs()),
            ttl_secs: self.policy.current_ttl().as_secs(),
            hit_rate: metrics.hit_rate(),
            hits: metrics.hits,
            misses: metrics.misses,
            stale_served: metrics.stale_served,
            failures: metrics.failures,
            last_error: metrics.last_error,
            last_error_category: metrics.last_error_category,
        }
    }
}
