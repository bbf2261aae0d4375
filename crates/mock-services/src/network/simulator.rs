//! 网络模拟器
//!
//! 每次 `simulate` 先等待（基础延迟 + 抖动），再按错误率决定是否失败。
//! 配置在克隆之间共享，修改只影响之后发起的调用。

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use parking_lot::RwLock;
use rand::Rng;
use showcase_shared::config::NetworkConfig;
use showcase_shared::{Result, ShowcaseError};
use tracing::{info, warn};

use crate::utils::roll;

/// 单次调用的网络参数
///
/// 未设置的字段使用模拟器的默认值
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkOptions {
    pub delay: Option<Duration>,
    pub error_rate: Option<f64>,
    pub error_message: Option<String>,
}

impl NetworkOptions {
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_error_rate(mut self, error_rate: f64) -> Self {
        self.error_rate = Some(error_rate);
        self
    }

    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }
}

/// 模拟器配置
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    pub default_delay: Duration,
    pub default_error_rate: f64,
    pub default_error_message: String,
    pub min_jitter: Duration,
    pub max_jitter: Duration,
    pub simulate_jitter: bool,
    pub enable_logging: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            default_delay: Duration::from_millis(300),
            default_error_rate: 0.0,
            default_error_message: "Network error occurred".to_string(),
            min_jitter: Duration::from_millis(50),
            max_jitter: Duration::from_millis(150),
            simulate_jitter: true,
            enable_logging: false,
        }
    }
}

impl From<&NetworkConfig> for SimulatorConfig {
    fn from(config: &NetworkConfig) -> Self {
        Self {
            default_delay: config.delay(),
            default_error_rate: config.error_rate,
            default_error_message: config.error_message.clone(),
            min_jitter: config.min_jitter(),
            max_jitter: config.max_jitter(),
            simulate_jitter: config.simulate_jitter,
            enable_logging: config.enable_logging,
        }
    }
}

impl SimulatorConfig {
    /// 固定延迟、无抖动的配置
    pub fn fixed(delay: Duration) -> Self {
        Self {
            default_delay: delay,
            simulate_jitter: false,
            ..Default::default()
        }
    }

    /// 计算实际等待时长
    ///
    /// 抖动在 `[min, max)` 内均匀抽取，再减去区间宽度的一半，结果不小于 0。
    /// 区间为空时抖动取 `min`。
    pub fn jittered_delay(&self, base: Duration) -> Duration {
        if !self.simulate_jitter || base.is_zero() {
            return base;
        }

        let jitter = if self.max_jitter > self.min_jitter {
            rand::thread_rng().gen_range(self.min_jitter..self.max_jitter)
        } else {
            self.min_jitter
        };
        let half_range = self.max_jitter.saturating_sub(self.min_jitter) / 2;

        (base + jitter).saturating_sub(half_range)
    }
}

/// 网络模拟器
#[derive(Debug, Clone, Default)]
pub struct NetworkSimulator {
    config: Arc<RwLock<SimulatorConfig>>,
}

impl NetworkSimulator {
    pub fn new(config: SimulatorConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
        }
    }

    /// 当前配置快照
    pub fn config(&self) -> SimulatorConfig {
        self.config.read().clone()
    }

    /// 整体替换配置
    pub fn set_config(&self, config: SimulatorConfig) {
        *self.config.write() = config;
    }

    /// 模拟一次网络往返
    ///
    /// 错误率命中时返回 `ShowcaseError::Network`
    pub async fn simulate(&self, options: &NetworkOptions) -> Result<()> {
        // 只在计算阶段持锁，等待期间的配置修改不影响本次调用
        let (wait, error_rate, error_message, logging) = {
            let config = self.config.read();
            let base = options.delay.unwrap_or(config.default_delay);
            let error_rate = options.error_rate.unwrap_or(config.default_error_rate);
            let error_message = options
                .error_message
                .clone()
                .unwrap_or_else(|| config.default_error_message.clone());
            (
                config.jittered_delay(base),
                error_rate,
                error_message,
                config.enable_logging,
            )
        };

        if logging {
            info!(delay_ms = wait.as_millis() as u64, "[网络模拟] 请求延迟");
        }

        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }

        if roll(error_rate) {
            if logging {
                warn!(error_rate, message = %error_message, "[网络模拟] 注入网络错误");
            }
            return Err(ShowcaseError::Network(error_message));
        }

        if logging {
            info!(delay_ms = wait.as_millis() as u64, "[网络模拟] 请求完成");
        }
        Ok(())
    }

    /// 包装异步函数，调用前先执行 `simulate`
    ///
    /// 多个参数以元组传入
    pub fn wrap<A, T, F, Fut>(
        &self,
        operation: F,
        options: NetworkOptions,
    ) -> impl Fn(A) -> BoxFuture<'static, Result<T>> + Send + Sync + 'static
    where
        A: Send + 'static,
        T: Send + 'static,
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        let simulator = self.clone();
        let operation = Arc::new(operation);

        move |args: A| {
            let simulator = simulator.clone();
            let operation = Arc::clone(&operation);
            let options = options.clone();
            async move {
                simulator.simulate(&options).await?;
                Ok(operation(args).await)
            }
            .boxed()
        }
    }

    /// 合并默认参数，只覆盖传入的字段
    pub fn set_default_options(&self, options: NetworkOptions) {
        let mut config = self.config.write();
        if let Some(delay) = options.delay {
            config.default_delay = delay;
        }
        if let Some(error_rate) = options.error_rate {
            config.default_error_rate = error_rate;
        }
        if let Some(message) = options.error_message {
            config.default_error_message = message;
        }
    }

    pub fn enable_jitter(&self, enabled: bool) {
        self.config.write().simulate_jitter = enabled;
    }

    pub fn enable_logs(&self, enabled: bool) {
        self.config.write().enable_logging = enabled;
    }

    pub fn set_jitter_range(&self, min: Duration, max: Duration) {
        let mut config = self.config.write();
        config.min_jitter = min;
        config.max_jitter = max;
    }
}
