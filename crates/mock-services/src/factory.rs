//! Mock 服务工厂
//!
//! 集中持有三个实体服务，首次获取时按当前的网络与数据配置构建并缓存。
//! 一般通过 `MockServiceFactory::new` 显式创建后注入使用；
//! 需要进程级共享时使用 `get_instance`。

use std::sync::{Arc, OnceLock};

use parking_lot::{Mutex, RwLock};
use showcase_shared::Result;
use showcase_shared::config::AppConfig;
use tracing::info;

use crate::generators::{MockDataOptions, load_orders, load_products, load_users};
use crate::network::{NetworkOptions, SimulatorConfig};
use crate::services::{
    OrderService, OrderServiceOptions, ProductService, ProductServiceOptions, UserService,
    UserServiceOptions,
};

static INSTANCE: OnceLock<Arc<MockServiceFactory>> = OnceLock::new();

/// 工厂配置
#[derive(Debug, Clone, Default)]
pub struct MockServiceFactoryOptions {
    pub network: SimulatorConfig,
    pub data: MockDataOptions,
}

impl From<&AppConfig> for MockServiceFactoryOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            network: SimulatorConfig::from(&config.network),
            data: MockDataOptions::from(&config.data),
        }
    }
}

/// Mock 服务工厂
#[derive(Debug, Default)]
pub struct MockServiceFactory {
    network: RwLock<SimulatorConfig>,
    data: RwLock<MockDataOptions>,
    product_service: Mutex<Option<Arc<ProductService>>>,
    user_service: Mutex<Option<Arc<UserService>>>,
    order_service: Mutex<Option<Arc<OrderService>>>,
}

impl MockServiceFactory {
    pub fn new(options: MockServiceFactoryOptions) -> Self {
        Self {
            network: RwLock::new(options.network),
            data: RwLock::new(options.data),
            ..Default::default()
        }
    }

    /// 进程级共享实例
    ///
    /// 只有第一次调用的配置生效，之后的参数被忽略
    pub fn get_instance(options: MockServiceFactoryOptions) -> Arc<Self> {
        Arc::clone(INSTANCE.get_or_init(|| Arc::new(Self::new(options))))
    }

    /// 当前网络配置
    pub fn network_config(&self) -> SimulatorConfig {
        self.network.read().clone()
    }

    /// 当前数据配置（已叠加环境变量）
    pub fn data_options(&self) -> MockDataOptions {
        self.data.read().resolved()
    }

    // ========================================================================
    // 服务获取
    // ========================================================================

    pub fn get_product_service(&self) -> Result<Arc<ProductService>> {
        self.get_product_service_with(ProductServiceOptions::default())
    }

    /// 获取商品服务
    ///
    /// 服务已存在时直接返回缓存，`options` 只在首次构建时使用；
    /// 其中未设置的初始数据与网络配置由工厂补齐
    pub fn get_product_service_with(
        &self,
        mut options: ProductServiceOptions,
    ) -> Result<Arc<ProductService>> {
        let mut slot = self.product_service.lock();
        if let Some(service) = slot.as_ref() {
            return Ok(Arc::clone(service));
        }

        if options.service.initial_data.is_none() {
            options.service.initial_data = Some(load_products(&self.data_options())?);
        }
        options.service.network.get_or_insert_with(|| self.network_config());

        let service = Arc::new(ProductService::new(options));
        info!(count = service.data_store().count(), "商品服务已创建");
        *slot = Some(Arc::clone(&service));
        Ok(service)
    }

    pub fn get_user_service(&self) -> Result<Arc<UserService>> {
        self.get_user_service_with(UserServiceOptions::default())
    }

    pub fn get_user_service_with(
        &self,
        mut options: UserServiceOptions,
    ) -> Result<Arc<UserService>> {
        let mut slot = self.user_service.lock();
        if let Some(service) = slot.as_ref() {
            return Ok(Arc::clone(service));
        }

        if options.service.initial_data.is_none() {
            options.service.initial_data = Some(load_users(&self.data_options())?);
        }
        options.service.network.get_or_insert_with(|| self.network_config());

        let service = Arc::new(UserService::new(options));
        info!(count = service.data_store().count(), "用户服务已创建");
        *slot = Some(Arc::clone(&service));
        Ok(service)
    }

    pub fn get_order_service(&self) -> Result<Arc<OrderService>> {
        self.get_order_service_with(OrderServiceOptions::default())
    }

    pub fn get_order_service_with(
        &self,
        mut options: OrderServiceOptions,
    ) -> Result<Arc<OrderService>> {
        let mut slot = self.order_service.lock();
        if let Some(service) = slot.as_ref() {
            return Ok(Arc::clone(service));
        }

        if options.service.initial_data.is_none() {
            options.service.initial_data = Some(load_orders(&self.data_options())?);
        }
        options.service.network.get_or_insert_with(|| self.network_config());

        let service = Arc::new(OrderService::new(options));
        info!(count = service.data_store().count(), "订单服务已创建");
        *slot = Some(Arc::clone(&service));
        Ok(service)
    }

    // ========================================================================
    // 配置
    // ========================================================================

    /// 合并网络默认参数，已创建的服务同步生效
    pub fn configure_network(&self, options: NetworkOptions) {
        {
            let mut network = self.network.write();
            if let Some(delay) = options.delay {
                network.default_delay = delay;
            }
            if let Some(error_rate) = options.error_rate {
                network.default_error_rate = error_rate;
            }
            if let Some(message) = &options.error_message {
                network.default_error_message = message.clone();
            }
        }

        if let Some(service) = self.product_service.lock().as_ref() {
            service.configure_network(options.clone());
        }
        if let Some(service) = self.user_service.lock().as_ref() {
            service.configure_network(options.clone());
        }
        if let Some(service) = self.order_service.lock().as_ref() {
            service.configure_network(options);
        }
        info!("网络模拟配置已更新");
    }

    /// 替换数据配置并丢弃已创建的服务
    ///
    /// `options` 整体取代当前数据配置，不与旧值合并
    pub fn configure_data(&self, options: MockDataOptions) {
        *self.data.write() = options;
        self.reset_services();
    }

    /// 开关网络日志，之后创建的服务也沿用该设置
    pub fn enable_network_logs(&self, enabled: bool) {
        self.network.write().enable_logging = enabled;

        if let Some(service) = self.product_service.lock().as_ref() {
            service.enable_network_logs(enabled);
        }
        if let Some(service) = self.user_service.lock().as_ref() {
            service.enable_network_logs(enabled);
        }
        if let Some(service) = self.order_service.lock().as_ref() {
            service.enable_network_logs(enabled);
        }
    }

    /// 丢弃缓存的服务，下次获取时重新构建
    ///
    /// 调用方已持有的 `Arc` 仍指向旧服务
    pub fn reset_services(&self) {
        *self.product_service.lock() = None;
        *self.user_service.lock() = None;
        *self.order_service.lock() = None;
        info!("已重置全部 mock 服务");
    }
}
