use crate::config::toml_config::TomlConfig;
use crate::utils::error::Result;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 命令列參數；有給的值會覆蓋設定檔
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "parcel-tracker")]
#[command(about = "Web front end for batch shipment tracking")]
pub struct CliConfig {
    #[arg(short, long, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Address to bind the HTTP server to")]
    pub host: Option<String>,

    #[arg(short, long, help = "Port to bind the HTTP server to")]
    pub port: Option<u16>,

    #[arg(long, help = "Tracking provider endpoint")]
    pub provider_endpoint: Option<String>,

    #[arg(long, help = "Maximum outbound lookups in flight per request")]
    pub concurrent_requests: Option<usize>,

    #[arg(long, help = "Per-lookup timeout in seconds")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// 讀取設定檔（若有）再套用命令列覆蓋值
    pub fn load(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(endpoint) = &self.provider_endpoint {
            config.provider.endpoint = endpoint.clone();
        }
        if let Some(concurrent) = self.concurrent_requests {
            config.batch.concurrent_requests = concurrent;
        }
        if let Some(timeout) = self.timeout_seconds {
            config.provider.timeout_seconds = timeout;
        }
        config.logging.verbose |= self.verbose;
        config.logging.json |= self.json_logs;
    }
}
