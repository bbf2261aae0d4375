//! 数据生成器
//!
//! 批量生成随机的商品、用户与订单，用于填充模拟服务。

use serde::Serialize;

use crate::models::{Order, Product, User};
use crate::store::MockDataStore;

/// 数据生成器配置
///
/// 控制每类数据的生成数量
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub product_count: usize,
    pub user_count: usize,
    pub order_count: usize,
}

impl Default for GeneratorConfig {
    /// 默认配置：20 商品、50 用户、30 订单
    fn default() -> Self {
        Self {
            product_count: 20,
            user_count: 50,
            order_count: 30,
        }
    }
}

/// 一组完整的演示数据
#[derive(Debug, Clone, Default)]
pub struct MockData {
    pub products: Vec<Product>,
    pub users: Vec<User>,
    pub orders: Vec<Order>,
}

/// 批量数据生成器
pub struct DataGenerator {
    config: GeneratorConfig,
}

impl DataGenerator {
    /// 创建数据生成器
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// 使用默认配置创建生成器
    pub fn with_defaults() -> Self {
        Self::new(GeneratorConfig::default())
    }

    pub fn generate_products(&self) -> Vec<Product> {
        (0..self.config.product_count)
            .map(|_| Product::random())
            .collect()
    }

    pub fn generate_users(&self) -> Vec<User> {
        (0..self.config.user_count).map(|_| User::random()).collect()
    }

    /// 生成随机订单
    ///
    /// 每个订单的客户都是新生成的随机用户，不要求出现在用户列表中
    pub fn generate_orders(&self) -> Vec<Order> {
        (0..self.config.order_count)
            .map(|_| Order::random(&User::random()))
            .collect()
    }

    /// 一次生成全部三类数据
    pub fn generate_all(&self) -> MockData {
        MockData {
            products: self.generate_products(),
            users: self.generate_users(),
            orders: self.generate_orders(),
        }
    }

    /// 获取配置
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}

/// 数据量统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationStats {
    pub products_count: usize,
    pub users_count: usize,
    pub orders_count: usize,
}

impl GenerationStats {
    pub fn from_data(data: &MockData) -> Self {
        Self {
            products_count: data.products.len(),
            users_count: data.users.len(),
            orders_count: data.orders.len(),
        }
    }

    /// 从存储中收集统计信息
    pub fn from_stores(
        products: &MockDataStore<Product>,
        users: &MockDataStore<User>,
        orders: &MockDataStore<Order>,
    ) -> Self {
        Self {
            products_count: products.count(),
            users_count: users.count(),
            orders_count: orders.count(),
        }
    }

    pub fn total(&self) -> usize {
        self.products_count + self.users_count + self.orders_count
    }
}

/// ID 是否互不相同
#[cfg(test)]
pub(crate) fn has_unique_ids<T: crate::models::Entity>(items: &[T]) -> bool {
    let mut ids: Vec<_> = items.iter().map(|item| item.id()).collect();
    ids.sort();
    ids.windows(2).all(|pair| pair[0] != pair[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_counts() {
        let generator = DataGenerator::new(GeneratorConfig {
            product_count: 7,
            user_count: 5,
            order_count: 3,
        });

        let data = generator.generate_all();
        let stats = GenerationStats::from_data(&data);
        assert_eq!(
            stats,
            GenerationStats {
                products_count: 7,
                users_count: 5,
                orders_count: 3,
            }
        );
        assert_eq!(stats.total(), 15);
    }

    #[test]
    fn test_generated_ids_unique() {
        let generator = DataGenerator::with_defaults();
        assert!(has_unique_ids(&generator.generate_products()));
        assert!(has_unique_ids(&generator.generate_users()));
        assert!(has_unique_ids(&generator.generate_orders()));
    }

    #[test]
    fn test_orders_are_consistent() {
        let generator = DataGenerator::with_defaults();
        for order in generator.generate_orders() {
            let items_total: f64 = order.items.iter().map(|i| i.total).sum();
            assert!((order.total - items_total).abs() < 1e-9);
            assert!(!order.customer_name.is_empty());
        }
    }

    #[test]
    fn test_stats_from_stores() {
        let generator = DataGenerator::with_defaults();
        let data = generator.generate_all();

        let products = MockDataStore::with_data(data.products.clone());
        let users = MockDataStore::with_data(data.users.clone());
        let orders = MockDataStore::with_data(data.orders.clone());

        let stats = GenerationStats::from_stores(&products, &users, &orders);
        assert_eq!(stats, GenerationStats::from_data(&data));
    }
}
