use crate::core::fetcher::BatchFetcher;
use crate::core::normalizer::normalize;
use crate::core::{TrackingProvider, TrackingResult};
use crate::utils::error::Result;
use std::sync::Arc;

/// 一次 `/track` 請求的完整流程：正規化輸入，再批次查詢
pub struct TrackingEngine<P: TrackingProvider> {
    fetcher: BatchFetcher<P>,
    max_ids: usize,
}

impl<P: TrackingProvider> TrackingEngine<P> {
    pub fn new(provider: Arc<P>, max_ids: usize, concurrent_requests: usize) -> Self {
        Self {
            fetcher: BatchFetcher::new(provider, concurrent_requests),
            max_ids,
        }
    }

    pub async fn run(&self, raw_ids: &str) -> Result<Vec<TrackingResult>> {
        let ids = normalize(raw_ids, self.max_ids)?;
        tracing::info!("Tracking {} package(s)", ids.len());

        let results = self.fetcher.fetch_all(&ids).await;
        tracing::debug!("Collected {} tracking results", results.len());

        Ok(results)
    }
}
