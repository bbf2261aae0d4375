//! CLI 命令定义
//!
//! 使用 clap derive 宏定义命令行接口结构。
//! 全局参数覆盖配置文件中的网络与数据设置，子命令对应数据服务的各项操作。

use std::fmt;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use showcase_shared::config::AppConfig;

use crate::query::SortSpec;

/// 组件展示页 mock 数据工具
///
/// 在终端里调用与展示页相同的 mock 数据服务。
/// 使用 `--help` 查看各子命令的详细说明。
#[derive(Parser, Debug)]
#[command(name = "mock-showcase")]
#[command(version, about = "组件展示页 mock 数据服务工具")]
#[command(propagate_version = true)]
pub struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)，覆盖配置文件
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// 使用内置静态数据
    #[arg(long, global = true)]
    pub static_data: bool,

    /// 基础网络延迟（毫秒）
    #[arg(long, global = true)]
    pub delay_ms: Option<u64>,

    /// 模拟错误率，取值 0..1
    #[arg(long, global = true)]
    pub error_rate: Option<f64>,

    /// 关闭延迟抖动
    #[arg(long, global = true)]
    pub no_jitter: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// 将命令行参数叠加到配置上
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
        if self.static_data {
            config.data.use_static_data = true;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.network.delay_ms = delay_ms;
        }
        if let Some(error_rate) = self.error_rate {
            config.network.error_rate = error_rate;
        }
        if self.no_jitter {
            config.network.simulate_jitter = false;
        }
    }
}

/// 实体类型
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    #[value(alias = "product")]
    Products,
    #[value(alias = "user")]
    Users,
    #[value(alias = "order")]
    Orders,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Products => f.write_str("products"),
            Self::Users => f.write_str("users"),
            Self::Orders => f.write_str("orders"),
        }
    }
}

/// 子命令枚举
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 搜索、过滤、排序并分页查询
    Query {
        entity: EntityKind,

        /// 全文搜索关键字
        #[arg(short, long)]
        q: Option<String>,

        /// 字段过滤（格式：field=value，可重复）
        ///
        /// value 能解析为 JSON 时按 JSON 处理，否则视为字符串
        #[arg(short, long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, Value)>,

        /// 排序（格式：field 或 field:asc|desc，可重复）
        #[arg(short, long)]
        sort: Vec<SortSpec>,

        /// 页码，从 0 开始
        #[arg(long, default_value = "0")]
        page: usize,

        /// 每页条数
        #[arg(long, default_value = "20")]
        page_size: usize,
    },

    /// 按 ID 获取单条记录
    Get { entity: EntityKind, id: String },

    /// 导出全部记录为 JSON
    Download {
        entity: EntityKind,

        /// 输出文件，缺省时写到标准输出
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 打印库存、订单与用户统计
    Stats {
        /// 低库存阈值
        #[arg(long, default_value = "10")]
        low_stock_threshold: u32,
    },
}

/// 解析 `field=value` 形式的过滤条件
pub fn parse_filter(raw: &str) -> Result<(String, Value), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("过滤条件格式应为 field=value: {raw}"))?;

    let field = field.trim();
    if field.is_empty() {
        return Err(format!("过滤字段不能为空: {raw}"));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((field.to_string(), value))
}

// ============================================================================
// 单元测试
// ============================================================================
