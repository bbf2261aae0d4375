//! 演示数据加载
//!
//! 根据配置选择内置静态数据或随机生成的数据。

use serde::Deserialize;
use showcase_shared::Result;
use showcase_shared::config::DataConfig;
use tracing::debug;

use super::data_generator::{DataGenerator, GeneratorConfig, MockData};
use super::fixtures::{static_orders, static_products, static_users};
use crate::models::{Order, Product, User};

/// 为 `true` 时强制使用静态数据
pub const USE_STATIC_DATA_ENV: &str = "SHOWCASE_USE_STATIC_DATA";

/// 各类数据的生成数量
///
/// 为 0 时回退到默认数量
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MockDataCount {
    pub products: usize,
    pub users: usize,
    pub orders: usize,
}

impl Default for MockDataCount {
    fn default() -> Self {
        let defaults = GeneratorConfig::default();
        Self {
            products: defaults.product_count,
            users: defaults.user_count,
            orders: defaults.order_count,
        }
    }
}

/// 数据加载参数
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MockDataOptions {
    pub use_static_data: bool,
    pub count: MockDataCount,
}

impl From<&DataConfig> for MockDataOptions {
    fn from(config: &DataConfig) -> Self {
        Self {
            use_static_data: config.use_static_data,
            count: MockDataCount {
                products: config.product_count,
                users: config.user_count,
                orders: config.order_count,
            },
        }
    }
}

impl MockDataOptions {
    /// 叠加环境变量后的实际选项
    pub fn resolved(&self) -> Self {
        Self {
            use_static_data: self.use_static_data || static_data_forced(),
            count: self.count.clone(),
        }
    }

    fn generator(&self) -> DataGenerator {
        let defaults = GeneratorConfig::default();
        let or_default = |value: usize, default: usize| if value == 0 { default } else { value };

        DataGenerator::new(GeneratorConfig {
            product_count: or_default(self.count.products, defaults.product_count),
            user_count: or_default(self.count.users, defaults.user_count),
            order_count: or_default(self.count.orders, defaults.order_count),
        })
    }
}

/// 环境变量是否要求使用静态数据
pub fn static_data_forced() -> bool {
    std::env::var(USE_STATIC_DATA_ENV)
        .map(|value| value.trim() == "true")
        .unwrap_or(false)
}

pub fn load_products(options: &MockDataOptions) -> Result<Vec<Product>> {
    if options.use_static_data {
        static_products()
    } else {
        Ok(options.generator().generate_products())
    }
}

pub fn load_users(options: &MockDataOptions) -> Result<Vec<User>> {
    if options.use_static_data {
        static_users()
    } else {
        Ok(options.generator().generate_users())
    }
}

pub fn load_orders(options: &MockDataOptions) -> Result<Vec<Order>> {
    if options.use_static_data {
        static_orders()
    } else {
        Ok(options.generator().generate_orders())
    }
}

/// 加载全部演示数据
pub fn load_mock_data(options: &MockDataOptions) -> Result<MockData> {
    debug!(use_static_data = options.use_static_data, "加载演示数据");
    Ok(MockData {
        products: load_products(options)?,
        users: load_users(options)?,
        orders: load_orders(options)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_counts() {
        let data = load_mock_data(&MockDataOptions::default()).unwrap();
        assert_eq!(data.products.len(), 20);
        assert_eq!(data.users.len(), 50);
        assert_eq!(data.orders.len(), 30);
    }

    #[test]
    fn test_custom_counts_and_zero_fallback() {
        let options = MockDataOptions {
            use_static_data: false,
            count: MockDataCount {
                products: 3,
                users: 0,
                orders: 1,
            },
        };
        let data = load_mock_data(&options).unwrap();
        assert_eq!(data.products.len(), 3);
        assert_eq!(data.users.len(), 50);
        assert_eq!(data.orders.len(), 1);
    }

    #[test]
    fn test_static_data() {
        let options = MockDataOptions {
            use_static_data: true,
            ..Default::default()
        };
        let data = load_mock_data(&options).unwrap();
        assert_eq!(data.products.len(), 12);
        assert_eq!(data.users.len(), 10);
        assert_eq!(data.orders.len(), 8);

        // 两次加载得到相同内容
        let again = load_products(&options).unwrap();
        assert_eq!(again, data.products);
    }

    #[test]
    fn test_from_data_config() {
        let options = MockDataOptions::from(&DataConfig {
            use_static_data: true,
            product_count: 1,
            user_count: 2,
            order_count: 3,
        });
        assert!(options.use_static_data);
        assert_eq!(options.count.orders, 3);
    }
}
