use chrono::{Local, Timelike};
use std::time::Duration;

use crate::config::Config;

/// How long a cached value counts as fresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtlPolicy {
    Fixed(Duration),
    /// Shorter TTL while matches are likely being played.
    ActiveHours {
        active: Duration,
        idle: Duration,
        start_hour: u32,
        end_hour: u32,
    },
}

impl TtlPolicy {
    pub fn news(config: &Config) -> Self {
        TtlPolicy::Fixed(Duration::from_secs(config.news_cache_ttl_secs))
    }

    pub fn standings(config: &Config) -> Self {
        TtlPolicy::Fixed(Duration::from_secs(config.standings_cache_ttl_secs))
    }

    pub fn matches(config: &Config) -> Self {
        TtlPolicy::ActiveHours {
            active: Duration::from_secs(config.matches_active_cache_ttl_secs),
            idle: Duration::from_secs(config.matches_cache_ttl_secs),
            start_hour: config.active_hours_start,
            end_hour: config.active_hours_end,
        }
    }

    /// TTL for a given local wall-clock hour.
    pub fn ttl_at(&self, hour: u32) -> Duration {
        match *self {
            TtlPolicy::Fixed(ttl) => ttl,
            TtlPolicy::ActiveHours {
                active,
                idle,
                start_hour,
                end_hour,
            } => {
                if is_active_hour(hour, start_hour, end_hour) {
                    active
                } else {
                    idle
                }
            }
        }
    }

    pub fn current_ttl(&self) -> Duration {
        self.ttl_at(Local::now().hour())
    }
}

/// Inclusive on both ends. A range with `start > end` wraps past midnight (22..=2).
pub fn is_active_hour(hour: u32, start: u32, end: u32) -> bool {
    if start <= end {
        (start..=end).contains(&hour)
    } else {
        hour >= start || hour <= end
    }
}
