/// In-memory caching in front of the upstream sources
///
/// - `cell`: one value plus its fetch time
/// - `policy`: TTL selection, including the active-hours rule for matches
/// - `handler`: fresh / refresh / stale-on-error orchestration per resource
pub mod cell;
pub mod handler;
pub mod policy;

pub use cell::{CacheCell, CacheEntry};
pub use handler::{CacheMetrics, CacheStatus, CachedResource, CachedResponse, Fetcher, Freshness};
pub use policy::{is_active_hour, TtlPolicy};
