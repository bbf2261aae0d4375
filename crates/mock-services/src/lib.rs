//! Mock Services
//!
//! 组件展示页使用的 mock 数据服务层：内存存储、网络模拟、
//! 通用查询管道，以及商品、用户、订单三个实体服务。
//!
//! # 主要模块
//!
//! - `store`: 按 ID 管理记录的内存存储
//! - `network`: 延迟与错误注入
//! - `query`: 搜索、过滤、排序与分页
//! - `services`: 数据服务抽象与实体服务
//! - `generators`: 随机数据与内置静态数据
//! - `factory`: 服务的创建与缓存
//!
//! # 使用示例
//!
//! ```rust
//! use std::time::Duration;
//! use mock_services::factory::{MockServiceFactory, MockServiceFactoryOptions};
//! use mock_services::network::{NetworkOptions, SimulatorConfig};
//! use mock_services::query::QueryOptions;
//! use mock_services::services::ReadonlyDataService;
//!
//! # tokio_test::block_on(async {
//! let factory = MockServiceFactory::new(MockServiceFactoryOptions {
//!     network: SimulatorConfig::fixed(Duration::ZERO),
//!     ..Default::default()
//! });
//!
//! let products = factory.get_product_service().unwrap();
//! let query = QueryOptions::new().search("a").page(0, 5);
//! let result = products.query(&query, &NetworkOptions::default()).await.unwrap();
//! assert!(result.rows().len() <= 5);
//! # });
//! ```

pub mod cli;
pub mod factory;
pub mod generators;
pub mod models;
pub mod network;
pub mod query;
pub mod services;
pub mod store;
pub mod utils;

pub use factory::{MockServiceFactory, MockServiceFactoryOptions};
pub use services::{DataService, ReadonlyDataService};
