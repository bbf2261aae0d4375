//! 模拟数据模型
//!
//! 包含商品、用户、订单等模拟数据结构，以及它们共同实现的 `Entity` 抽象。

pub mod entity;
pub mod order;
pub mod product;
pub mod user;

pub use entity::{Entity, EntityId};
pub use order::{Order, OrderDraft, OrderItem, OrderPatch, OrderStatus};
pub use product::{PRODUCT_CATEGORIES, Product, ProductDraft, ProductPatch, sample_products};
pub use user::{User, UserDraft, UserPatch, UserStatus};
