use crate::core::{ConfigProvider, TrackingProvider};
use crate::utils::error::{Result, TrackerError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::collections::BTreeMap;
use std::time::Duration;

/// 以 reqwest 呼叫外部追蹤 API：`GET <endpoint>?wbn=<id>`
pub struct HttpTrackingProvider {
    client: Client,
    endpoint: String,
    headers: HeaderMap,
    timeout: Option<Duration>,
}

impl HttpTrackingProvider {
    pub fn new(
        endpoint: impl Into<String>,
        headers: &BTreeMap<String, String>,
        timeout_seconds: Option<u64>,
    ) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            headers: build_header_map(headers)?,
            timeout: timeout_seconds.map(Duration::from_secs),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.provider_endpoint(),
            config.provider_headers(),
            Some(config.timeout_seconds()),
        )
    }
}

fn build_header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| TrackerError::ConfigError {
            message: format!("invalid header name {:?}: {}", key, e),
        })?;
        let value = HeaderValue::from_str(value).map_err(|e| TrackerError::ConfigError {
            message: format!("invalid value for header {:?}: {}", key, e),
        })?;
        map.insert(name, value);
    }
    Ok(map)
}

#[async_trait]
impl TrackingProvider for HttpTrackingProvider {
    async fn track(&self, identifier: &str) -> Result<serde_json::Value> {
        let mut request = self
            .client
            .get(&self.endpoint)
            .headers(self.headers.clone())
            .query(&[("wbn", identifier)]);

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!("Requesting tracking data for {} from {}", identifier, self.endpoint);
        let response = request.send().await?;
        tracing::debug!("Provider response status for {}: {}", identifier, response.status());

        // 不看狀態碼：供應商回的 JSON 錯誤內容照樣轉給前端
        let payload: serde_json::Value = response.json().await?;
        Ok(payload)
    }
}
