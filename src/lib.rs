pub mod cache;
pub mod config;
pub mod error;
pub mod football;
pub mod server;
pub mod upstream;
pub mod utils;

pub use cache::{CachedResource, Fetcher, Freshness};
pub use config::Config;
pub use error::DashboardError;
pub use server::{create_router, AppState, DashboardServer};
