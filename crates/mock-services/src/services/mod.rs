//! Mock 服务模块
//!
//! 数据服务接口、通用 mock 实现与三个实体服务。

pub mod base;
pub mod enhanced;
pub mod order_service;
pub mod product_service;
pub mod traits;
pub mod user_service;

pub use base::BaseMockService;
pub use enhanced::{EnhancedMockService, ServiceOptions};
pub use order_service::{OrderService, OrderServiceOptions, OrderStats};
pub use product_service::{ProductService, ProductServiceOptions};
pub use traits::{DataService, ReadonlyDataService};
pub use user_service::{UserService, UserServiceOptions};
