//! 可观测性模块
//!
//! 提供日志的统一初始化。mock 数据层没有对外端口，
//! 因此只保留结构化日志，不导出指标与分布式追踪。

pub mod tracing;

pub use self::tracing::{LogFormat, init};
