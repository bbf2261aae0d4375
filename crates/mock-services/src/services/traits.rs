//! 数据服务接口
//!
//! 展示页组件只依赖这两个 trait，不关心背后是 mock 还是真实后端。

use async_trait::async_trait;
use serde::Serialize;
use showcase_shared::Result;

use crate::models::{Entity, EntityId};
use crate::network::NetworkOptions;
use crate::query::{Blob, DataResult, EntityResult, QueryOptions};

/// 只读数据服务
///
/// 所有方法的 `Err` 只表示模拟网络故障，记录不存在等结果以返回值表达
#[async_trait]
pub trait ReadonlyDataService<T: Entity>: Send + Sync {
    /// 获取全部记录
    async fn get_all(&self, options: &NetworkOptions) -> Result<DataResult<T>>;

    /// 按 ID 获取，不存在时 `data` 为空且没有错误
    async fn get_by_id(&self, id: &EntityId, options: &NetworkOptions)
    -> Result<EntityResult<T>>;

    /// 搜索、过滤、排序与分页
    async fn query(
        &self,
        query: &QueryOptions,
        options: &NetworkOptions,
    ) -> Result<DataResult<T>>;

    /// 导出全部记录为 JSON
    async fn download(&self, options: &NetworkOptions) -> Result<Blob>;
}

/// 可写数据服务
#[async_trait]
pub trait DataService<T: Entity>: ReadonlyDataService<T> {
    async fn create(&self, draft: T::Draft, options: &NetworkOptions)
    -> Result<EntityResult<T>>;

    /// 浅合并更新，记录不存在时在结果中返回 `NotFound`
    async fn update<P>(
        &self,
        id: &EntityId,
        patch: &P,
        options: &NetworkOptions,
    ) -> Result<EntityResult<T>>
    where
        P: Serialize + Sync + ?Sized;

    /// 删除记录，不存在时返回 `false`
    async fn delete(&self, id: &EntityId, options: &NetworkOptions) -> Result<bool>;
}
