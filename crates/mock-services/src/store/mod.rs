//! 存储模块
//!
//! 提供按插入顺序保存实体的通用内存存储。

pub mod data_store;

pub use data_store::{IdGenerator, MockDataStore, MockDataStoreOptions, prefixed_id_generator};
