use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// 外部追蹤服務：每個追蹤號碼查一次，回傳解碼後的 JSON
#[async_trait]
pub trait TrackingProvider: Send + Sync {
    async fn track(&self, identifier: &str) -> Result<serde_json::Value>;
}

pub trait ConfigProvider: Send + Sync {
    fn bind_address(&self) -> String;
    fn provider_endpoint(&self) -> &str;
    fn provider_headers(&self) -> &BTreeMap<String, String>;
    fn timeout_seconds(&self) -> u64;
    fn max_ids(&self) -> usize;
    fn concurrent_requests(&self) -> usize;
    fn body_limit_bytes(&self) -> usize;
}
