//! Single-slot cache cell holding the last good value of one upstream resource.

use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// The value together with the moment it was fetched
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub value: T,
    pub fetched_at: Instant,
}

impl<T> CacheEntry<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            fetched_at: Instant::now(),
        }
    }

    pub fn age(&self) -> Duration {
        self.fetched_at.elapsed()
    }

    /// Check if the entry is still valid based on TTL
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.age() < ttl
    }
}

/// Holds at most one entry. Value and timestamp are swapped together under one lock so a reader
/// never pairs a new value with an old timestamp.
#[derive(Debug)]
pub struct CacheCell<T> {
    entry: RwLock<Option<CacheEntry<T>>>,
}

impl<T: Clone> CacheCell<T> {
    pub fn new() -> Self {
        Self {
            entry: RwLock::new(None),
        }
    }

    /// Last stored value, whatever its age.
    pub async fn get(&self) -> Option<T> {
        self.entry.read().await.as_ref().map(|e| e.value.clone())
    }

    /// Last stored value, only if younger than `ttl`.
    pub async fn fresh(&self, ttl: Duration) -> Option<T> {
        self.entry
            .read()
            .await
            .as_ref()
            .filter(|e| e.is_fresh(ttl))
            .map(|e| e.value.clone())
    }

    /// Age of the stored value; `None` when nothing was ever stored.
    pub async fn peek_age(&self) -> Option<Duration> {
        self.entry.read().await.as_ref().map(|e| e.age())
    }

    pub async fn set(&self, value: T) {
        *self.entry.write().await = Some(CacheEntry::new(value));
    }

    pub async fn has_value(&self) -> bool {
        self.entry.read().await.is_some()
    }
}

impl<T: Clone> Default for CacheCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_cell() {
        let cell: CacheCell<String> = CacheCell::new();
        assert!(cell.get().await.is_none());
        assert!(cell.peek_age().await.is_none());
        assert!(cell.fresh(Duration::from_secs(60)).await.is_none());
        assert!(!cell.has_value().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_freshness_follows_ttl() {
        let cell = CacheCell::new();
        cell.set("feed".to_string()).await;

        assert_eq!(cell.fresh(Duration::from_secs(60)).await.as_deref(), Some("feed"));

        tokio::time::advance(Duration::from_secs(61)).await;

        assert!(cell.fresh(Duration::from_secs(60)).await.is_none());
        // Still there for stale serving
        assert_eq!(cell.get().await.as_deref(), Some("feed"));
        assert!(cell.peek_age().await.unwrap() >= Duration::from_secs(61));
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_restamps() {
        let cell = CacheCell::new();
        cell.set(1u32).await;
        tokio::time::advance(Duration::from_secs(120)).await;
        cell.set(2u32).await;

        assert_eq!(cell.fresh(Duration::from_secs(60)).await, Some(2));
        assert!(cell.peek_age().await.unwrap() < Duration::from_secs(1));
    }
}
