//! 共享库
//!
//! 包含 mock 数据层共用的错误类型、配置加载与日志初始化。

pub mod config;
pub mod error;
pub mod observability;

pub use error::{Result, ShowcaseError};
