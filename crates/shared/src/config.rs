//! 配置管理模块
//!
//! 支持多格式配置文件加载，环境变量覆盖，以及类型安全的配置访问。

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// 网络模拟配置
///
/// 控制 mock 服务的延迟、抖动与错误注入
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub delay_ms: u64,
    /// 错误率，取值 0..1
    pub error_rate: f64,
    pub error_message: String,
    pub simulate_jitter: bool,
    pub min_jitter_ms: u64,
    pub max_jitter_ms: u64,
    pub enable_logging: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            delay_ms: 300,
            error_rate: 0.0,
            error_message: "Network error occurred".to_string(),
            simulate_jitter: true,
            min_jitter_ms: 50,
            max_jitter_ms: 150,
            enable_logging: false,
        }
    }
}

impl NetworkConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn min_jitter(&self) -> Duration {
        Duration::from_millis(self.min_jitter_ms)
    }

    pub fn max_jitter(&self) -> Duration {
        Duration::from_millis(self.max_jitter_ms)
    }
}

/// 数据加载配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// 使用内置的静态 JSON 数据而非随机生成
    pub use_static_data: bool,
    pub product_count: usize,
    pub user_count: usize,
    pub order_count: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            use_static_data: false,
            product_count: 20,
            user_count: 50,
            order_count: 30,
        }
    }
}

/// 可观测性配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub log_level: String,
    /// 日志输出格式：json（结构化）或 pretty（人类可读）
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub service_name: String,
    pub environment: String,
    pub network: NetworkConfig,
    pub data: DataConfig,
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. .env 文件（如果存在）
    /// 2. config/default.toml（默认配置）
    /// 3. config/{environment}.toml（环境特定配置）
    /// 4. config/{service_name}.toml（服务特定配置）
    /// 5. 环境变量（SHOWCASE__ 前缀，如 SHOWCASE__NETWORK__DELAY_MS -> network.delay_ms）
    pub fn load(service_name: &str) -> Result<Self, ConfigError> {
        // .env 缺失不是错误
        let _ = dotenvy::dotenv();

        let env = std::env::var("SHOWCASE_ENV").unwrap_or_else(|_| "development".to_string());

        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

        let builder = Config::builder()
            .set_default("service_name", service_name)?
            .set_default("environment", env.clone())?
            .add_source(File::from(Path::new(&config_dir).join("default.toml")).required(false))
            .add_source(
                File::from(Path::new(&config_dir).join(format!("{}.toml", env))).required(false),
            )
            .add_source(
                File::from(Path::new(&config_dir).join(format!("{}.toml", service_name)))
                    .required(false),
            )
            // 字段名本身含下划线，层级分隔符使用双下划线
            .add_source(
                Environment::with_prefix("SHOWCASE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
