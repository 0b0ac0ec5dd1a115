pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::HttpTrackingProvider;
pub use app::{create_router, create_router_with_body_limit, AppState};
pub use config::TomlConfig;
pub use crate::core::{fetcher::BatchFetcher, normalizer::normalize, tracker::TrackingEngine};
pub use utils::error::{Result, TrackerError};
