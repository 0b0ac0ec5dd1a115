use crate::core::fetcher::DEFAULT_CONCURRENT_REQUESTS;
use crate::core::normalizer::DEFAULT_MAX_IDS;
use crate::core::ConfigProvider;
use crate::utils::error::{Result, TrackerError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_PROVIDER_ENDPOINT: &str = "https://dlv-api.delhivery.com/v3/unified-tracking";
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// 追蹤服務要求的瀏覽器 headers，值必須原樣送出
pub fn default_provider_headers() -> BTreeMap<String, String> {
    [
        ("accept", "application/json, text/plain, */*"),
        ("accept-language", "en-GB,en-US;q=0.9,en;q=0.8"),
        ("origin", "https://www.delhivery.com"),
        ("referer", "https://www.delhivery.com/"),
        (
            "user-agent",
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/127.0.0.0 Safari/537.36",
        ),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub batch: BatchConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            body_limit_bytes: DEFAULT_BODY_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub endpoint: String,
    /// 每次查詢的逾時秒數
    pub timeout_seconds: u64,
    /// 沒有設定時使用 [`default_provider_headers`]；有設定則整組取代
    pub headers: BTreeMap<String, String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_PROVIDER_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            headers: default_provider_headers(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub max_ids: usize,
    pub concurrent_requests: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_ids: DEFAULT_MAX_IDS,
            concurrent_requests: DEFAULT_CONCURRENT_REQUESTS,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub verbose: bool,
    pub json: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TrackerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| TrackerError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TRACKER_ENDPOINT})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("server.host", &self.server.host)?;
        validation::validate_positive_number(
            "server.body_limit_bytes",
            self.server.body_limit_bytes,
            1,
        )?;

        validation::validate_url("provider.endpoint", &self.provider.endpoint)?;
        validation::validate_headers("provider.headers", &self.provider.headers)?;
        validation::validate_range(
            "provider.timeout_seconds",
            self.provider.timeout_seconds,
            1,
            600,
        )?;

        validation::validate_range("batch.max_ids", self.batch.max_ids, 1, 1000)?;
        validation::validate_range(
            "batch.concurrent_requests",
            self.batch.concurrent_requests,
            1,
            100,
        )?;

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()?;
        tracing::debug!("Configuration validation passed");
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn provider_endpoint(&self) -> &str {
        &self.provider.endpoint
    }

    fn provider_headers(&self) -> &BTreeMap<String, String> {
        &self.provider.headers
    }

    fn timeout_seconds(&self) -> u64 {
        self.provider.timeout_seconds
    }

    fn max_ids(&self) -> usize {
        self.batch.max_ids
    }

    fn concurrent_requests(&self) -> usize {
        self.batch.concurrent_requests
    }

    fn body_limit_bytes(&self) -> usize {
        self.server.body_limit_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_reproduce_provider_contract() {
        let config = TomlConfig::default();

        assert_eq!(config.provider_endpoint(), DEFAULT_PROVIDER_ENDPOINT);
        assert_eq!(config.max_ids(), 20);
        assert_eq!(config.bind_address(), "127.0.0.1:5000");
        assert_eq!(config.timeout_seconds(), DEFAULT_TIMEOUT_SECONDS);

        let headers = config.provider_headers();
        assert_eq!(headers.len(), 5);
        assert_eq!(headers["accept-language"], "en-GB,en-US;q=0.9,en;q=0.8");
        assert_eq!(headers["origin"], "https://www.delhivery.com");
        assert!(headers["user-agent"].contains("Chrome/127.0.0.0"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.batch.concurrent_requests, 5);
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_partial_sections_fill_in_defaults() {
        let config = TomlConfig::from_toml_str(
            r#"
[server]
port = 8080

[provider]
endpoint = "http://localhost:9999/v3/unified-tracking"
timeout_seconds = 10

[provider.headers]
accept = "application/json"

[batch]
concurrent_requests = 1
"#,
        )
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.timeout_seconds(), 10);
        assert_eq!(config.provider_headers().len(), 1);
        assert_eq!(config.concurrent_requests(), 1);
        assert_eq!(config.max_ids(), 20);
        assert!(config.validate_config().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PARCEL_TRACKER_TEST_ENDPOINT", "http://mock.local/track");
        let config = TomlConfig::from_toml_str(
            r#"
[provider]
endpoint = "${PARCEL_TRACKER_TEST_ENDPOINT}"
"#,
        )
        .unwrap();
        assert_eq!(config.provider.endpoint, "http://mock.local/track");
    }

    #[test]
    fn test_unknown_env_var_is_left_in_place() {
        let config = TomlConfig::from_toml_str(
            r#"
[server]
host = "${PARCEL_TRACKER_SURELY_UNSET_VAR}"
"#,
        )
        .unwrap();
        assert_eq!(config.server.host, "${PARCEL_TRACKER_SURELY_UNSET_VAR}");
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let mut config = TomlConfig::default();
        config.provider.endpoint = "ftp://example.com".to_string();
        assert!(config.validate_config().is_err());

        let mut config = TomlConfig::default();
        config.batch.concurrent_requests = 0;
        assert!(config.validate_config().is_err());

        let mut config = TomlConfig::default();
        config.batch.max_ids = 0;
        assert!(config.validate_config().is_err());

        let mut config = TomlConfig::default();
        config.provider.timeout_seconds = 0;
        assert!(config.validate_config().is_err());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[server\nport = 1").unwrap_err();
        assert!(matches!(err, TrackerError::ConfigError { .. }));
    }
}
