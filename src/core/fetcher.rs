use crate::domain::model::{IdentifierList, TrackingResult};
use crate::domain::ports::TrackingProvider;
use futures::stream::{self, StreamExt};
use std::sync::Arc;

pub const DEFAULT_CONCURRENT_REQUESTS: usize = 5;

/// 逐一查詢清單中的追蹤號碼
///
/// 同時進行的請求數量以 `concurrent_requests` 為上限，結果順序與輸入相同。
/// 單一號碼失敗只會在該位置放入錯誤物件，不影響其他號碼，也不重試。
pub struct BatchFetcher<P: TrackingProvider> {
    provider: Arc<P>,
    concurrent_requests: usize,
}

impl<P: TrackingProvider> BatchFetcher<P> {
    pub fn new(provider: Arc<P>, concurrent_requests: usize) -> Self {
        Self {
            provider,
            // buffered(0) 永遠不會前進
            concurrent_requests: concurrent_requests.max(1),
        }
    }

    pub fn concurrent_requests(&self) -> usize {
        self.concurrent_requests
    }

    pub async fn fetch_all(&self, ids: &IdentifierList) -> Vec<TrackingResult> {
        tracing::debug!(
            "Fetching {} tracking IDs ({} at a time)",
            ids.len(),
            self.concurrent_requests
        );

        // 先建立每個號碼的 future；buffered() 依提交順序產出，第 i 筆結果留在第 i 個位置
        let lookups: Vec<_> = ids.iter().map(|id| self.fetch_one(id)).collect();
        let results: Vec<TrackingResult> = stream::iter(lookups)
            .buffered(self.concurrent_requests)
            .collect()
            .await;

        let failures = results.iter().filter(|r| r.is_failed()).count();
        if failures > 0 {
            tracing::info!("Batch finished with {}/{} failed lookups", failures, results.len());
        }

        results
    }

    async fn fetch_one(&self, id: &str) -> TrackingResult {
        match self.provider.track(id).await {
            Ok(payload) => TrackingResult::Found(payload),
            Err(e) => {
                tracing::warn!("Error tracking {}: {}", id, e);
                TrackingResult::failed(id)
            }
        }
    }
}
