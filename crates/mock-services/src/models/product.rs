//! 模拟商品模型
//!
//! 商品目录演示页使用的数据结构，附带一组固定的示例数据。

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId};
use crate::utils::generate_random_id;

/// 商品 ID 前缀
pub const PRODUCT_ID_PREFIX: &str = "prod_";

/// 可选的商品类别
pub const PRODUCT_CATEGORIES: [&str; 10] = [
    "Electronics",
    "Furniture",
    "Clothing",
    "Accessories",
    "Home & Garden",
    "Sports & Outdoors",
    "Books",
    "Toys & Games",
    "Health & Beauty",
    "Automotive",
];

const NAME_PREFIXES: [&str; 11] = [
    "Premium",
    "Deluxe",
    "Ultra",
    "Pro",
    "Classic",
    "Modern",
    "Essential",
    "Luxury",
    "Budget",
    "Standard",
    "Elite",
];

const NAME_ROOTS: [&str; 12] = [
    "Widget", "Gadget", "Device", "Tool", "System", "Set", "Pack", "Kit", "Bundle", "Solution",
    "Model", "Series",
];

/// 模拟商品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: EntityId,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: u32,
}

/// 创建商品的输入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: u32,
}

/// 商品部分更新
///
/// 为 `None` 的字段不会序列化，因此不会覆盖原值
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

impl Entity for Product {
    type Draft = ProductDraft;

    const NAME: &'static str = "Product";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn from_draft(id: EntityId, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            category: draft.category,
            price: draft.price,
            stock: draft.stock,
        }
    }
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: "New Product".to_string(),
            category: "Electronics".to_string(),
            price: 99.99,
            stock: 10,
        }
    }
}

impl Product {
    /// 生成随机商品
    ///
    /// 名称由可选前缀、词根和一个大写字母组成，价格保留两位小数
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();

        let prefix = if rng.gen_bool(0.7) {
            format!("{} ", NAME_PREFIXES[rng.gen_range(0..NAME_PREFIXES.len())])
        } else {
            String::new()
        };
        let root = NAME_ROOTS[rng.gen_range(0..NAME_ROOTS.len())];
        let suffix = char::from(b'A' + rng.gen_range(0..26u8));

        let price: f64 = rng.gen_range(9.99..999.99);

        Self {
            id: EntityId::from(generate_random_id(PRODUCT_ID_PREFIX)),
            name: format!("{prefix}{root} {suffix}"),
            category: PRODUCT_CATEGORIES[rng.gen_range(0..PRODUCT_CATEGORIES.len())].to_string(),
            price: (price * 100.0).round() / 100.0,
            stock: rng.gen_range(0..=100),
        }
    }

    /// 库存价值（单价 × 库存）
    pub fn inventory_value(&self) -> f64 {
        self.price * f64::from(self.stock)
    }
}

/// 演示用的五个固定商品
pub fn sample_products() -> Vec<Product> {
    [
        ("1", "Product A", "Electronics", 499.99, 25),
        ("2", "Product B", "Furniture", 199.5, 12),
        ("3", "Product C", "Electronics", 299.99, 8),
        ("4", "Product D", "Clothing", 59.99, 42),
        ("5", "Product E", "Accessories", 29.99, 65),
    ]
    .into_iter()
    .map(|(id, name, category, price, stock)| Product {
        id: EntityId::from(id),
        name: name.to_string(),
        category: category.to_string(),
        price,
        stock,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_random() {
        let product = Product::random();

        assert!(product.id.to_string().starts_with(PRODUCT_ID_PREFIX));
        assert!(PRODUCT_CATEGORIES.contains(&product.category.as_str()));
        assert!(product.price >= 9.99 && product.price <= 999.99);
        assert!(product.stock <= 100);
        // 价格最多两位小数
        assert!(((product.price * 100.0).round() - product.price * 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_sample_products() {
        let products = sample_products();
        assert_eq!(products.len(), 5);
        let stocks: Vec<u32> = products.iter().map(|p| p.stock).collect();
        assert_eq!(stocks, vec![25, 12, 8, 42, 65]);
    }

    #[test]
    fn test_patch_skips_unset_fields() {
        let patch = ProductPatch {
            stock: Some(3),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "stock": 3 }));
    }

    #[test]
    fn test_inventory_value() {
        let product = Product::from_draft(
            EntityId::from("p"),
            ProductDraft {
                price: 2.5,
                stock: 4,
                ..Default::default()
            },
        );
        assert_eq!(product.inventory_value(), 10.0);
    }
}
