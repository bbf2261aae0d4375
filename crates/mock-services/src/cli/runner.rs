//! 命令执行器
//!
//! 负责执行各 CLI 子命令的具体逻辑。
//! 将命令行参数转化为对工厂中数据服务的调用，并把结果输出为 JSON。

use std::fs;
use std::io::Write as _;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::info;

use super::commands::{Commands, EntityKind};
use crate::factory::MockServiceFactory;
use crate::generators::GenerationStats;
use crate::models::{Entity, EntityId};
use crate::network::NetworkOptions;
use crate::query::{Blob, DataResult, EntityResult, QueryOptions, SortSpec};
use crate::services::{EnhancedMockService, OrderStats, ReadonlyDataService};

/// stats 命令的汇总结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub counts: GenerationStats,
    pub low_stock: usize,
    pub inventory_value: f64,
    pub active_users: usize,
    pub order_stats: OrderStats,
}

/// 命令执行器
///
/// 持有服务工厂，所有子命令共享同一组服务实例。
pub struct CommandRunner {
    factory: Arc<MockServiceFactory>,
    network: NetworkOptions,
}

impl CommandRunner {
    /// 创建命令执行器
    pub fn new(factory: Arc<MockServiceFactory>) -> Self {
        Self {
            factory,
            network: NetworkOptions::default(),
        }
    }

    /// 执行子命令并把结果写到标准输出
    pub async fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Query {
                entity,
                q,
                filters,
                sort,
                page,
                page_size,
            } => {
                let query = build_query(q, filters, sort, page, page_size);
                let output = self.run_query(entity, &query).await?;
                print_json(&output)?;
            }
            Commands::Get { entity, id } => {
                let output = self.run_get(entity, &id).await?;
                print_json(&output)?;
            }
            Commands::Download { entity, output } => {
                let blob = self.run_download(entity).await?;
                write_blob(&blob, output.as_deref())?;
            }
            Commands::Stats {
                low_stock_threshold,
            } => {
                let report = self.run_stats(low_stock_threshold).await?;
                print_stats(&report);
            }
        }

        Ok(())
    }

    // ========================================================================
    // 子命令
    // ========================================================================

    /// 执行 query 命令
    ///
    /// 输出 `{ "count": 总数, "data": [当前页] }`
    pub async fn run_query(&self, entity: EntityKind, query: &QueryOptions) -> Result<Value> {
        info!(%entity, page = query.page_index(), "执行查询");

        let output = match entity {
            EntityKind::Products => {
                let service = self.factory.get_product_service()?;
                query_json(&**service, query, &self.network).await?
            }
            EntityKind::Users => {
                let service = self.factory.get_user_service()?;
                query_json(&**service, query, &self.network).await?
            }
            EntityKind::Orders => {
                let service = self.factory.get_order_service()?;
                query_json(&**service, query, &self.network).await?
            }
        };

        Ok(output)
    }

    /// 执行 get 命令
    ///
    /// 纯数字的 ID 先按数字查找，找不到再按字符串查找
    pub async fn run_get(&self, entity: EntityKind, id: &str) -> Result<Value> {
        for candidate in id_candidates(id) {
            let found = match entity {
                EntityKind::Products => {
                    let service = self.factory.get_product_service()?;
                    get_json(&**service, &candidate, &self.network).await?
                }
                EntityKind::Users => {
                    let service = self.factory.get_user_service()?;
                    get_json(&**service, &candidate, &self.network).await?
                }
                EntityKind::Orders => {
                    let service = self.factory.get_order_service()?;
                    get_json(&**service, &candidate, &self.network).await?
                }
            };

            if let Some(value) = found {
                return Ok(value);
            }
        }

        bail!("{} 中不存在 id={} 的记录", entity, id)
    }

    /// 执行 download 命令
    pub async fn run_download(&self, entity: EntityKind) -> Result<Blob> {
        let blob = match entity {
            EntityKind::Products => {
                let service = self.factory.get_product_service()?;
                service.download(&self.network).await
            }
            EntityKind::Users => {
                let service = self.factory.get_user_service()?;
                service.download(&self.network).await
            }
            EntityKind::Orders => {
                let service = self.factory.get_order_service()?;
                service.download(&self.network).await
            }
        }
        .with_context(|| format!("导出 {} 失败", entity))?;

        info!(%entity, bytes = blob.len(), "导出完成");
        Ok(blob)
    }

    /// 执行 stats 命令
    pub async fn run_stats(&self, low_stock_threshold: u32) -> Result<StatsReport> {
        let products = self.factory.get_product_service()?;
        let users = self.factory.get_user_service()?;
        let orders = self.factory.get_order_service()?;

        let low_stock = products
            .find_low_stock(low_stock_threshold, &self.network)
            .await
            .context("查询低库存商品失败")?;
        let inventory_value = products
            .calculate_inventory_value(&self.network)
            .await
            .context("计算库存总值失败")?;
        let active_users = users
            .get_active_users_count(&self.network)
            .await
            .context("统计在线用户失败")?;
        let order_stats = orders
            .get_order_stats(&self.network)
            .await
            .context("统计订单失败")?;

        Ok(StatsReport {
            counts: GenerationStats::from_stores(
                products.data_store(),
                users.data_store(),
                orders.data_store(),
            ),
            low_stock: low_stock.count,
            inventory_value: required(inventory_value, "库存总值")?,
            active_users: required(active_users, "在线用户数")?,
            order_stats: required(order_stats, "订单统计")?,
        })
    }
}

// ============================================================================
// 辅助函数
// ============================================================================

/// 由命令行参数组装查询条件
pub fn build_query(
    q: Option<String>,
    filters: Vec<(String, Value)>,
    sort: Vec<SortSpec>,
    page: usize,
    page_size: usize,
) -> QueryOptions {
    let mut query = QueryOptions::new().page(page, page_size);
    if let Some(term) = q {
        query = query.search(term);
    }
    for (field, value) in filters {
        query = query.filter(field, value);
    }
    for spec in sort {
        query = query.sort_by(spec);
    }
    query
}

async fn query_json<T: Entity>(
    service: &EnhancedMockService<T>,
    query: &QueryOptions,
    network: &NetworkOptions,
) -> Result<Value> {
    let result: DataResult<T> = service.query(query, network).await.context("查询失败")?;
    Ok(json!({
        "count": result.count,
        "data": serde_json::to_value(result.rows())?,
    }))
}

async fn get_json<T: Entity>(
    service: &EnhancedMockService<T>,
    id: &EntityId,
    network: &NetworkOptions,
) -> Result<Option<Value>> {
    let result = service.get_by_id(id, network).await.context("获取记录失败")?;
    match result.data {
        Some(entity) => Ok(Some(serde_json::to_value(entity)?)),
        None => Ok(None),
    }
}

fn id_candidates(raw: &str) -> Vec<EntityId> {
    match raw.parse::<i64>() {
        Ok(number) => vec![EntityId::Number(number), EntityId::from(raw)],
        Err(_) => vec![EntityId::from(raw)],
    }
}

fn required<T>(result: EntityResult<T>, what: &str) -> Result<T> {
    if let Some(error) = result.error {
        return Err(error).with_context(|| format!("{}获取失败", what));
    }
    result
        .data
        .with_context(|| format!("{}缺失", what))
}

fn print_json(value: &Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("序列化输出失败")?;
    println!("{}", text);
    Ok(())
}

fn write_blob(blob: &Blob, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let mut file = fs::File::create(path)
                .with_context(|| format!("创建输出文件失败: {}", path.display()))?;
            file.write_all(blob.as_bytes()).context("写入文件失败")?;
            info!(path = %path.display(), "数据已输出到文件");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(blob.as_bytes()).context("写入标准输出失败")?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn print_stats(report: &StatsReport) {
    println!("\n数据统计:");
    println!("{}", "-".repeat(30));
    println!("记录总数: {}", report.counts.total());
    println!("商品数量: {}", report.counts.products_count);
    println!("低库存商品: {}", report.low_stock);
    println!("库存总值: {:.2}", report.inventory_value);
    println!("用户数量: {}", report.counts.users_count);
    println!("在线用户: {}", report.active_users);
    println!("订单数量: {}", report.counts.orders_count);
    println!("销售总额: {:.2}", report.order_stats.total_sales);
    println!("平均订单金额: {:.2}", report.order_stats.avg_order_value);
    for (status, count) in &report.order_stats.status_counts {
        println!("  {}: {}", status.as_str(), count);
    }
    println!("{}", "-".repeat(30));
}

// ============================================================================
// 单元测试
// ============================================================================
