//! 订单服务
//!
//! 订单表格演示使用的订单服务，附带销售统计。

use std::collections::BTreeMap;
use std::ops::Deref;

use serde::Serialize;
use showcase_shared::Result;

use super::enhanced::{EnhancedMockService, ServiceOptions};
use super::traits::{DataService, ReadonlyDataService};
use crate::models::order::ORDER_ID_PREFIX;
use crate::models::{Entity, EntityId, Order, OrderDraft, OrderPatch, OrderStatus};
use crate::network::NetworkOptions;
use crate::query::{DataResult, EntityResult, QueryOptions, SortSpec};
use crate::store::prefixed_id_generator;
use crate::utils::{generate_mock_data, generate_random_id};

/// 未提供数据时生成的订单数量
pub const DEFAULT_MOCK_ORDER_COUNT: usize = 20;

/// 最近订单的默认条数
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// 订单统计
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderStats {
    pub total_orders: usize,
    /// 每种状态都有条目，没有订单的状态计为 0
    pub status_counts: BTreeMap<OrderStatus, usize>,
    pub total_sales: f64,
    pub avg_order_value: f64,
}

impl OrderStats {
    fn from_orders(orders: &[Order]) -> Self {
        let mut status_counts: BTreeMap<OrderStatus, usize> =
            OrderStatus::ALL.iter().map(|status| (*status, 0)).collect();
        for order in orders {
            *status_counts.entry(order.status).or_default() += 1;
        }

        let total_sales: f64 = orders.iter().map(|o| o.total).sum();
        let avg_order_value = if orders.is_empty() {
            0.0
        } else {
            total_sales / orders.len() as f64
        };

        Self {
            total_orders: orders.len(),
            status_counts,
            total_sales,
            avg_order_value,
        }
    }
}

/// 订单服务配置
pub struct OrderServiceOptions {
    pub service: ServiceOptions<Order>,
    pub mock_order_count: usize,
}

impl Default for OrderServiceOptions {
    fn default() -> Self {
        Self {
            service: ServiceOptions::default(),
            mock_order_count: DEFAULT_MOCK_ORDER_COUNT,
        }
    }
}

/// 订单服务
#[derive(Debug)]
pub struct OrderService {
    inner: EnhancedMockService<Order>,
}

impl Deref for OrderService {
    type Target = EnhancedMockService<Order>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Default for OrderService {
    fn default() -> Self {
        Self::new(OrderServiceOptions::default())
    }
}

impl OrderService {
    /// 初始数据为空时生成默认订单
    pub fn new(options: OrderServiceOptions) -> Self {
        let OrderServiceOptions {
            service,
            mock_order_count,
        } = options;

        let initial_data = match service.initial_data {
            Some(data) if !data.is_empty() => data,
            _ => generate_mock_data(mock_order_count, |_| {
                Order::from_draft(
                    EntityId::from(generate_random_id(ORDER_ID_PREFIX)),
                    OrderDraft::default(),
                )
            }),
        };

        let inner = EnhancedMockService::new(ServiceOptions {
            initial_data: Some(initial_data),
            entity_name: Some(
                service
                    .entity_name
                    .unwrap_or_else(|| Order::NAME.to_string()),
            ),
            id_generator: Some(
                service
                    .id_generator
                    .unwrap_or_else(|| prefixed_id_generator(ORDER_ID_PREFIX)),
            ),
            network: service.network,
            searchable_fields: Some(service.searchable_fields.unwrap_or_else(|| {
                vec!["order_number".to_string(), "customer_name".to_string()]
            })),
        });

        Self { inner }
    }

    fn newest_first() -> QueryOptions {
        QueryOptions::new().sort_by(SortSpec::desc("order_date"))
    }

    /// 按订单号或客户名搜索，最新的在前
    pub async fn search_orders(
        &self,
        term: &str,
        options: &NetworkOptions,
    ) -> Result<DataResult<Order>> {
        let query = Self::newest_first().search(term);
        self.inner.query(&query, options).await
    }

    pub async fn find_by_status(
        &self,
        status: OrderStatus,
        options: &NetworkOptions,
    ) -> Result<DataResult<Order>> {
        let query = Self::newest_first().filter("status", status.as_str());
        self.inner.query(&query, options).await
    }

    /// 客户 ID 按子串匹配，与通用过滤规则一致
    pub async fn find_by_customer_id(
        &self,
        customer_id: &str,
        options: &NetworkOptions,
    ) -> Result<DataResult<Order>> {
        let query = Self::newest_first().filter("customer_id", customer_id);
        self.inner.query(&query, options).await
    }

    pub async fn update_status(
        &self,
        id: &EntityId,
        status: OrderStatus,
        options: &NetworkOptions,
    ) -> Result<EntityResult<Order>> {
        let patch = OrderPatch {
            status: Some(status),
            ..Default::default()
        };
        self.inner.update(id, &patch, options).await
    }

    /// 最新的 `limit` 条订单，`count` 为订单总数
    pub async fn find_recent_orders(
        &self,
        limit: usize,
        options: &NetworkOptions,
    ) -> Result<DataResult<Order>> {
        let query = Self::newest_first().page(0, limit);
        self.inner.query(&query, options).await
    }

    pub async fn calculate_total_sales(
        &self,
        options: &NetworkOptions,
    ) -> Result<EntityResult<f64>> {
        let total = self
            .inner
            .with_store(options, |store| {
                store.map(|o| o.total).into_iter().sum::<f64>()
            })
            .await?;
        Ok(EntityResult::found(total))
    }

    pub async fn get_order_stats(
        &self,
        options: &NetworkOptions,
    ) -> Result<EntityResult<OrderStats>> {
        let stats = self
            .inner
            .with_store(options, |store| OrderStats::from_orders(&store.get_all()))
            .await?;
        Ok(EntityResult::found(stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderItem;
    use crate::network::SimulatorConfig;
    use chrono::{TimeZone, Utc};
    use std::time::Duration;

    fn order(id: &str, customer: &str, day: u32, status: OrderStatus, total: f64) -> Order {
        Order {
            id: EntityId::from(id),
            order_number: format!("ORD-00000{day}-001"),
            customer_id: customer.to_string(),
            customer_name: format!("Customer {customer}"),
            order_date: Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
            status,
            items: vec![OrderItem::new("p", "Widget", 1, total)],
            total,
            shipping_address: None,
            notes: None,
        }
    }

    fn fixture() -> Vec<Order> {
        vec![
            order("o1", "cust_1", 1, OrderStatus::Pending, 10.0),
            order("o2", "cust_2", 5, OrderStatus::Shipped, 20.0),
            order("o3", "cust_1", 3, OrderStatus::Delivered, 30.0),
            order("o4", "cust_3", 9, OrderStatus::Pending, 40.0),
        ]
    }

    fn service_with(data: Vec<Order>) -> OrderService {
        OrderService::new(OrderServiceOptions {
            service: ServiceOptions::default()
                .with_data(data)
                .with_network(SimulatorConfig::fixed(Duration::ZERO)),
            ..Default::default()
        })
    }

    fn net() -> NetworkOptions {
        NetworkOptions::default()
    }

    fn ids(result: &DataResult<Order>) -> Vec<String> {
        result.rows().iter().map(|o| o.id.to_string()).collect()
    }

    #[tokio::test]
    async fn test_generates_default_orders() {
        let service = service_with(Vec::new());
        assert_eq!(service.data_store().count(), DEFAULT_MOCK_ORDER_COUNT);

        let all = service.get_all(&net()).await.unwrap();
        for order in all.rows() {
            assert!(order.id.to_string().starts_with(ORDER_ID_PREFIX));
            assert_eq!(order.status, OrderStatus::Pending);
            assert_eq!(order.items.len(), 2);
        }
    }

    #[tokio::test]
    async fn test_find_recent_orders() {
        let service = service_with(fixture());
        let result = service.find_recent_orders(2, &net()).await.unwrap();
        assert_eq!(ids(&result), vec!["o4", "o2"]);
        assert_eq!(result.count, 4);
    }

    #[tokio::test]
    async fn test_find_by_status_and_customer() {
        let service = service_with(fixture());

        let result = service
            .find_by_status(OrderStatus::Pending, &net())
            .await
            .unwrap();
        assert_eq!(ids(&result), vec!["o4", "o1"]);

        let result = service.find_by_customer_id("cust_1", &net()).await.unwrap();
        assert_eq!(ids(&result), vec!["o3", "o1"]);
    }

    #[tokio::test]
    async fn test_search_orders() {
        let service = service_with(fixture());
        let result = service
            .search_orders("customer cust_2", &net())
            .await
            .unwrap();
        assert_eq!(ids(&result), vec!["o2"]);

        let result = service.search_orders("ORD-", &net()).await.unwrap();
        assert_eq!(result.count, 4);
    }

    #[tokio::test]
    async fn test_update_status() {
        let service = service_with(fixture());
        let result = service
            .update_status(&EntityId::from("o1"), OrderStatus::Canceled, &net())
            .await
            .unwrap();
        assert_eq!(result.data.unwrap().status, OrderStatus::Canceled);
    }

    #[tokio::test]
    async fn test_total_sales_and_stats() {
        let service = service_with(fixture());

        let total = service.calculate_total_sales(&net()).await.unwrap();
        assert_eq!(total.data, Some(100.0));

        let stats = service.get_order_stats(&net()).await.unwrap().data.unwrap();
        assert_eq!(stats.total_orders, 4);
        assert_eq!(stats.total_sales, 100.0);
        assert_eq!(stats.avg_order_value, 25.0);
        assert_eq!(stats.status_counts.len(), OrderStatus::ALL.len());
        assert_eq!(stats.status_counts[&OrderStatus::Pending], 2);
        assert_eq!(stats.status_counts[&OrderStatus::Processing], 0);
    }

    #[test]
    fn test_stats_without_orders() {
        let stats = OrderStats::from_orders(&[]);
        assert_eq!(stats.total_orders, 0);
        assert_eq!(stats.avg_order_value, 0.0);
        assert!(stats.status_counts.values().all(|count| *count == 0));
    }
}
