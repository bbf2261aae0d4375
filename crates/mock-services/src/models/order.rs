//! 模拟订单模型
//!
//! 用于订单表格演示的订单数据结构，支持随机生成以模拟真实业务场景。

use std::fmt;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use fake::Fake;
use fake::faker::address::en::{CityName, StateAbbr, StreetName, ZipCode};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId};
use super::product::Product;
use super::user::User;
use crate::utils::generate_random_id;

/// 订单 ID 前缀
pub const ORDER_ID_PREFIX: &str = "ord_";

const ORDER_NOTES: [&str; 5] = [
    "Please deliver to the back door.",
    "Customer requested gift wrapping.",
    "Fragile items inside, handle with care.",
    "Call customer before delivery.",
    "Customer requested expedited shipping.",
];

/// 模拟订单
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: EntityId,
    /// 可读的订单号，如 ORD-123456-042
    pub order_number: String,
    pub customer_id: String,
    pub customer_name: String,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// 订单项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: f64,
    /// quantity × unit_price
    pub total: f64,
}

/// 创建订单的输入
///
/// 订单号由系统生成；`total` 缺省时按订单项汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub customer_id: String,
    pub customer_name: String,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub shipping_address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// 订单部分更新
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// 订单状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Canceled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Canceled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Canceled => "canceled",
        }
    }

    fn random() -> Self {
        Self::ALL[rand::thread_rng().gen_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 生成可读订单号
///
/// 格式：ORD-{时间戳末 6 位}-{3 位随机数}
pub fn generate_order_number() -> String {
    let millis = Utc::now().timestamp_millis().rem_euclid(1_000_000);
    let random = rand::thread_rng().gen_range(0..1000);
    format!("ORD-{millis:06}-{random:03}")
}

/// 汇总订单项金额
pub fn calculate_order_total(items: &[OrderItem]) -> f64 {
    items.iter().map(|item| item.total).sum()
}

impl Entity for Order {
    type Draft = OrderDraft;

    const NAME: &'static str = "Order";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn from_draft(id: EntityId, draft: OrderDraft) -> Self {
        let total = draft
            .total
            .unwrap_or_else(|| calculate_order_total(&draft.items));

        Self {
            id,
            order_number: generate_order_number(),
            customer_id: draft.customer_id,
            customer_name: draft.customer_name,
            order_date: draft.order_date.trunc_subsecs(0),
            status: draft.status,
            items: draft.items,
            total,
            shipping_address: draft.shipping_address,
            notes: draft.notes,
        }
    }
}

impl Default for OrderDraft {
    /// 两个示例商品的待处理订单
    fn default() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            customer_id: format!("cust_{}", rng.gen_range(0..1000)),
            customer_name: format!("Customer {}", rng.gen_range(0..100)),
            order_date: Utc::now().trunc_subsecs(0),
            status: OrderStatus::Pending,
            items: vec![OrderItem::sample(), OrderItem::sample()],
            total: None,
            shipping_address: None,
            notes: None,
        }
    }
}

impl OrderItem {
    /// 由单价与数量构造订单项，自动计算小计
    pub fn new(
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        quantity: u32,
        unit_price: f64,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            quantity,
            unit_price,
            total: unit_price * f64::from(quantity),
        }
    }

    /// 编号随机的示例订单项，单价为 1-100 的整数
    pub fn sample() -> Self {
        let mut rng = rand::thread_rng();
        Self::new(
            format!("prod_{}", rng.gen_range(0..1000)),
            format!("Sample Product {}", rng.gen_range(0..100)),
            rng.gen_range(1..=5),
            f64::from(rng.gen_range(1..=100u32)),
        )
    }

    /// 基于随机商品生成订单项
    pub fn random() -> Self {
        let product = Product::random();
        let quantity = rand::thread_rng().gen_range(1..=5);
        Self::new(product.id.to_string(), product.name, quantity, product.price)
    }
}

impl Order {
    /// 为指定客户生成随机订单
    ///
    /// 包含 1-3 个订单项，下单时间在过去一年内，约 30% 的订单带备注
    pub fn random(customer: &User) -> Self {
        let mut rng = rand::thread_rng();

        let item_count = rng.gen_range(1..=3);
        let items: Vec<OrderItem> = (0..item_count).map(|_| OrderItem::random()).collect();
        let total = calculate_order_total(&items);

        // 精确到秒，保证 RFC 3339 字符串的字典序与时间序一致
        let seconds_ago = rng.gen_range(0..365 * 24 * 3600);
        let order_date = (Utc::now() - Duration::seconds(seconds_ago)).trunc_subsecs(0);

        let notes = if rng.gen_bool(0.3) {
            Some(ORDER_NOTES[rng.gen_range(0..ORDER_NOTES.len())].to_string())
        } else {
            None
        };

        Self {
            id: EntityId::from(generate_random_id(ORDER_ID_PREFIX)),
            order_number: generate_order_number(),
            customer_id: customer.id.to_string(),
            customer_name: customer.name.clone(),
            order_date,
            status: OrderStatus::random(),
            items,
            total,
            shipping_address: Some(random_address()),
            notes,
        }
    }
}

fn random_address() -> String {
    let number = rand::thread_rng().gen_range(1..1000);
    let street: String = StreetName().fake();
    let city: String = CityName().fake();
    let state: String = StateAbbr().fake();
    let zip: String = ZipCode().fake();
    format!("{number} {street}, {city}, {state} {zip}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_order_random() {
        let customer = User::indexed(1);
        let order = Order::random(&customer);

        assert!(order.id.to_string().starts_with(ORDER_ID_PREFIX));
        assert!(order.order_number.starts_with("ORD-"));
        assert_eq!(order.customer_id, "item-1");
        assert_eq!(order.customer_name, "User 1");
        assert!((1..=3).contains(&order.items.len()));
        assert!((order.total - calculate_order_total(&order.items)).abs() < 1e-9);
        assert!(order.order_date <= Utc::now());
        assert!(order.shipping_address.is_some());
    }

    #[test]
    fn test_order_item_new_computes_total() {
        let item = OrderItem::new("p1", "Widget", 3, 2.5);
        assert_eq!(item.total, 7.5);
    }

    #[test]
    fn test_from_draft_keeps_explicit_total() {
        let draft = OrderDraft {
            total: Some(1.0),
            ..Default::default()
        };
        let order = Order::from_draft(EntityId::from("o1"), draft);
        assert_eq!(order.total, 1.0);

        let draft = OrderDraft {
            items: vec![OrderItem::new("a", "A", 2, 10.0), OrderItem::new("b", "B", 1, 5.0)],
            ..Default::default()
        };
        let order = Order::from_draft(EntityId::from("o2"), draft);
        assert_eq!(order.total, 25.0);
        assert!(order.order_number.starts_with("ORD-"));
    }

    #[test]
    fn test_from_draft_truncates_order_date() {
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let draft = OrderDraft {
            order_date: date + Duration::milliseconds(500),
            ..Default::default()
        };
        let order = Order::from_draft(EntityId::from("o1"), draft);
        assert_eq!(order.order_date, date);

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["order_date"], serde_json::json!("2024-03-01T12:00:00Z"));
    }

    #[test]
    fn test_order_number_format() {
        let number = generate_order_number();
        let parts: Vec<&str> = number.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[1].len(), 6);
        assert_eq!(parts[2].len(), 3);
    }

    #[test]
    fn test_order_status_serialization() {
        let json = serde_json::to_string(&OrderStatus::Canceled).unwrap();
        assert_eq!(json, "\"canceled\"");
        let status: OrderStatus = serde_json::from_str("\"shipped\"").unwrap();
        assert_eq!(status, OrderStatus::Shipped);
    }
}
