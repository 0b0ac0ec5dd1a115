pub mod fetcher;
pub mod normalizer;
pub mod tracker;

pub use crate::domain::model::{IdentifierList, TrackingRequest, TrackingResult};
pub use crate::domain::ports::{ConfigProvider, TrackingProvider};
pub use crate::utils::error::Result;
