//! 基础 mock 服务
//!
//! 自带数据列表的简单实现：固定延迟、无抖动，必须提供 ID 生成器，
//! 全文搜索覆盖所有字符串字段。

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Serialize;
use showcase_shared::{Result, ShowcaseError};

use super::traits::{DataService, ReadonlyDataService};
use crate::models::{Entity, EntityId};
use crate::network::{NetworkOptions, NetworkSimulator, SimulatorConfig};
use crate::query::{Blob, DataResult, EntityResult, QueryOptions, execute};
use crate::store::IdGenerator;
use crate::store::data_store::{merge_patch, patch_object, upsert};

/// 基础服务的默认错误消息
pub const BASE_ERROR_MESSAGE: &str = "An error occurred while processing your request.";

/// 基础 mock 服务
pub struct BaseMockService<T> {
    data: RwLock<Vec<T>>,
    network: NetworkSimulator,
    id_generator: IdGenerator,
}

impl<T> fmt::Debug for BaseMockService<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseMockService")
            .field("count", &self.data.read().len())
            .finish()
    }
}

impl<T: Entity> BaseMockService<T> {
    pub fn new(id_generator: IdGenerator) -> Self {
        Self::with_data(Vec::new(), id_generator)
    }

    pub fn with_data(initial_data: Vec<T>, id_generator: IdGenerator) -> Self {
        let mut data = Vec::with_capacity(initial_data.len());
        for entity in initial_data {
            upsert(&mut data, entity);
        }

        Self {
            data: RwLock::new(data),
            network: NetworkSimulator::new(SimulatorConfig {
                default_error_message: BASE_ERROR_MESSAGE.to_string(),
                ..SimulatorConfig::fixed(Duration::from_millis(300))
            }),
            id_generator,
        }
    }

    /// 合并默认网络参数
    pub fn set_default_options(&self, options: NetworkOptions) {
        self.network.set_default_options(options);
    }

    pub fn count(&self) -> usize {
        self.data.read().len()
    }
}

#[async_trait]
impl<T: Entity> ReadonlyDataService<T> for BaseMockService<T> {
    async fn get_all(&self, options: &NetworkOptions) -> Result<DataResult<T>> {
        self.network.simulate(options).await?;

        let data = self.data.read().clone();
        let count = data.len();
        Ok(DataResult::ok(data, count))
    }

    async fn get_by_id(
        &self,
        id: &EntityId,
        options: &NetworkOptions,
    ) -> Result<EntityResult<T>> {
        self.network.simulate(options).await?;

        let found = self.data.read().iter().find(|e| e.id() == id).cloned();
        Ok(found.map_or_else(EntityResult::missing, EntityResult::found))
    }

    async fn query(
        &self,
        query: &QueryOptions,
        options: &NetworkOptions,
    ) -> Result<DataResult<T>> {
        self.network.simulate(options).await?;

        let snapshot = self.data.read().clone();
        let (data, count) = execute(snapshot, query, &[])?;
        Ok(DataResult::ok(data, count))
    }

    async fn download(&self, options: &NetworkOptions) -> Result<Blob> {
        self.network.simulate(options).await?;

        let snapshot = self.data.read().clone();
        Blob::json(&snapshot)
    }
}

#[async_trait]
impl<T: Entity> DataService<T> for BaseMockService<T> {
    async fn create(
        &self,
        draft: T::Draft,
        options: &NetworkOptions,
    ) -> Result<EntityResult<T>> {
        self.network.simulate(options).await?;

        let entity = T::from_draft((self.id_generator)(), draft);
        self.data.write().push(entity.clone());
        Ok(EntityResult::found(entity))
    }

    async fn update<P>(
        &self,
        id: &EntityId,
        patch: &P,
        options: &NetworkOptions,
    ) -> Result<EntityResult<T>>
    where
        P: Serialize + Sync + ?Sized,
    {
        self.network.simulate(options).await?;

        let patch = match patch_object(patch) {
            Ok(patch) => patch,
            Err(e) => return Ok(EntityResult::failed(e)),
        };

        let mut data = self.data.write();
        let Some(slot) = data.iter_mut().find(|e| e.id() == id) else {
            return Ok(EntityResult::failed(ShowcaseError::not_found("Entity", id)));
        };

        Ok(match merge_patch(slot, &patch) {
            Ok(updated) => {
                *slot = updated.clone();
                EntityResult::found(updated)
            }
            Err(e) => EntityResult::failed(e),
        })
    }

    async fn delete(&self, id: &EntityId, options: &NetworkOptions) -> Result<bool> {
        self.network.simulate(options).await?;

        let mut data = self.data.write();
        match data.iter().position(|e| e.id() == id) {
            Some(index) => {
                data.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
