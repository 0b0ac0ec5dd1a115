//! HTTP 處理函式共用的應用程式狀態

use std::sync::Arc;

use crate::adapters::HttpTrackingProvider;
use crate::app::page::render_page;
use crate::core::tracker::TrackingEngine;
use crate::core::{ConfigProvider, TrackingProvider};
use crate::utils::error::Result;

/// 整個行程共用、不可變的狀態；請求不會修改它，處理函式透過 `Arc` 共享，不需要鎖
pub struct AppState<P: TrackingProvider> {
    pub engine: TrackingEngine<P>,
    pub page: String,
}

impl<P: TrackingProvider> AppState<P> {
    pub fn new(provider: Arc<P>, max_ids: usize, concurrent_requests: usize) -> Self {
        Self {
            engine: TrackingEngine::new(provider, max_ids, concurrent_requests),
            page: render_page(max_ids),
        }
    }
}

impl AppState<HttpTrackingProvider> {
    /// 建立正式環境的狀態：依 `config` 設定 reqwest 供應商
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let provider = Arc::new(HttpTrackingProvider::from_config(config)?);
        Ok(Self::new(
            provider,
            config.max_ids(),
            config.concurrent_requests(),
        ))
    }
}
