//! CLI 模块
//!
//! 提供命令行接口，支持以下功能：
//!
//! - `query` - 搜索、过滤、排序并分页查询实体
//! - `get` - 按 ID 获取单条记录
//! - `download` - 导出全部记录为 JSON
//! - `stats` - 打印库存、用户与订单统计
//!
//! # 使用示例
//!
//! ```bash
//! # 搜索商品，按价格降序，每页 5 条
//! mock-showcase query products -q desk --sort price:desc --page-size 5
//!
//! # 过滤待处理订单，不模拟延迟
//! mock-showcase query orders --filter status=pending --delay-ms 0
//!
//! # 导出内置静态用户数据
//! mock-showcase download users --static-data -o users.json
//! ```

pub mod commands;
pub mod runner;

pub use commands::{Cli, Commands, EntityKind};
pub use runner::{CommandRunner, StatsReport};
