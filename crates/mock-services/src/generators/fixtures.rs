//! 内置静态数据
//!
//! 编译期嵌入 `data/*.json`，每次加载都重新解析，调用方拿到独立副本。

use serde::de::DeserializeOwned;
use showcase_shared::Result;

use crate::models::{Order, Product, User};

const PRODUCTS_JSON: &str = include_str!("../../data/products.json");
const USERS_JSON: &str = include_str!("../../data/users.json");
const ORDERS_JSON: &str = include_str!("../../data/orders.json");

fn parse<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>> {
    Ok(serde_json::from_str(raw)?)
}

pub fn static_products() -> Result<Vec<Product>> {
    parse(PRODUCTS_JSON)
}

pub fn static_users() -> Result<Vec<User>> {
    parse(USERS_JSON)
}

pub fn static_orders() -> Result<Vec<Order>> {
    parse(ORDERS_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::data_generator::has_unique_ids;
    use crate::models::{OrderStatus, UserStatus};

    #[test]
    fn test_static_products() {
        let products = static_products().unwrap();
        assert_eq!(products.len(), 12);
        assert!(has_unique_ids(&products));
        assert_eq!(products.iter().filter(|p| p.stock < 10).count(), 5);
    }

    #[test]
    fn test_static_users() {
        let users = static_users().unwrap();
        assert_eq!(users.len(), 10);
        assert!(has_unique_ids(&users));
        assert_eq!(
            users.iter().filter(|u| u.status == UserStatus::Active).count(),
            4
        );
    }

    #[test]
    fn test_static_orders() {
        let orders = static_orders().unwrap();
        assert_eq!(orders.len(), 8);
        assert!(has_unique_ids(&orders));

        for order in &orders {
            let items_total: f64 = order.items.iter().map(|i| i.total).sum();
            assert!((order.total - items_total).abs() < 1e-6, "{}", order.id);
        }
        assert_eq!(
            orders
                .iter()
                .filter(|o| o.status == OrderStatus::Pending)
                .count(),
            2
        );
    }
}
