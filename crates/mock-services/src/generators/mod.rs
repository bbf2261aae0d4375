//! 生成器模块
//!
//! 随机数据生成、内置静态数据与按配置加载。

pub mod data_generator;
pub mod fixtures;
pub mod mock_data;

pub use data_generator::{DataGenerator, GenerationStats, GeneratorConfig, MockData};
pub use mock_data::{
    MockDataCount, MockDataOptions, USE_STATIC_DATA_ENV, load_mock_data, load_orders,
    load_products, load_users, static_data_forced,
};
