//! salescast-config - 配置加载库

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// 遥测配置
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// 预测配置
///
/// 模型文件和历史数据源只在启动时读取一次
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastConfig {
    /// 序列化模型文件路径
    #[serde(default = "default_model_path")]
    pub model_path: String,
    /// 历史观测数据位置（http(s) URL 或本地 CSV 路径）
    #[serde(default = "default_dataset")]
    pub dataset: String,
    #[serde(default = "default_date_column")]
    pub date_column: String,
    #[serde(default = "default_value_column")]
    pub value_column: String,
    /// 未提供 days 参数时的预测天数
    #[serde(default = "default_horizon")]
    pub default_horizon: u32,
}

fn default_model_path() -> String {
    "models/sales_model.json".to_string()
}

fn default_dataset() -> String {
    "https://raw.githubusercontent.com/4GeeksAcademy/alternative-time-series-project/main/sales.csv"
        .to_string()
}

fn default_date_column() -> String {
    "date".to_string()
}

fn default_value_column() -> String {
    "sales".to_string()
}

fn default_horizon() -> u32 {
    7
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            dataset: default_dataset(),
            date_column: default_date_column(),
            value_column: default_value_column(),
            default_horizon: default_horizon(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default = "default_app_env")]
    pub app_env: String,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub forecast: ForecastConfig,
}

fn default_app_name() -> String {
    "sales-forecast".to_string()
}

fn default_app_env() -> String {
    "development".to_string()
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 优先级: 环境变量 (APP_ 前缀, `__` 分隔层级) > {env}.toml > default.toml
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config: Self = Figment::new()
            .merge(Toml::file(format!("{}/default.toml", config_dir)))
            .merge(Toml::file(format!("{}/{}.toml", config_dir, env)))
            .merge(Env::prefixed("APP_").split("__"))
            .extract()?;

        Ok(config)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }
}
