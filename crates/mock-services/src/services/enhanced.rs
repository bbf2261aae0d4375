//! 组合式 mock 服务
//!
//! 由 `MockDataStore` 保存数据、`NetworkSimulator` 模拟网络，
//! 每次调用先等待模拟延迟，再对存储做一次同步操作。

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use showcase_shared::Result;
use tracing::debug;

use super::traits::{DataService, ReadonlyDataService};
use crate::models::{Entity, EntityId};
use crate::network::{NetworkOptions, NetworkSimulator, SimulatorConfig};
use crate::query::{Blob, DataResult, EntityResult, QueryOptions, execute};
use crate::store::{IdGenerator, MockDataStore, MockDataStoreOptions};

/// 服务配置
///
/// 各字段为空时使用默认值：实体名 `Entity`、8 位随机 ID、
/// 默认网络配置、在所有字符串字段中搜索
pub struct ServiceOptions<T> {
    pub initial_data: Option<Vec<T>>,
    pub entity_name: Option<String>,
    pub id_generator: Option<IdGenerator>,
    pub network: Option<SimulatorConfig>,
    pub searchable_fields: Option<Vec<String>>,
}

impl<T> Default for ServiceOptions<T> {
    fn default() -> Self {
        Self {
            initial_data: None,
            entity_name: None,
            id_generator: None,
            network: None,
            searchable_fields: None,
        }
    }
}

impl<T> ServiceOptions<T> {
    pub fn with_data(mut self, data: Vec<T>) -> Self {
        self.initial_data = Some(data);
        self
    }

    pub fn with_network(mut self, network: SimulatorConfig) -> Self {
        self.network = Some(network);
        self
    }
}

/// 通用 mock 服务
pub struct EnhancedMockService<T> {
    data_store: MockDataStore<T>,
    network: NetworkSimulator,
    searchable_fields: Vec<String>,
    entity_name: String,
}

impl<T> fmt::Debug for EnhancedMockService<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnhancedMockService")
            .field("entity_name", &self.entity_name)
            .field("data_store", &self.data_store)
            .field("searchable_fields", &self.searchable_fields)
            .finish()
    }
}

impl<T: Entity> Default for EnhancedMockService<T> {
    fn default() -> Self {
        Self::new(ServiceOptions::default())
    }
}

impl<T: Entity> EnhancedMockService<T> {
    pub fn new(options: ServiceOptions<T>) -> Self {
        let entity_name = options
            .entity_name
            .unwrap_or_else(|| "Entity".to_string());

        let data_store = MockDataStore::new(MockDataStoreOptions {
            initial_data: options.initial_data.unwrap_or_default(),
            id_generator: options.id_generator,
            entity_name: entity_name.clone(),
        });

        Self {
            data_store,
            network: NetworkSimulator::new(options.network.unwrap_or_default()),
            searchable_fields: options.searchable_fields.unwrap_or_default(),
            entity_name,
        }
    }

    /// 底层存储
    pub fn data_store(&self) -> &MockDataStore<T> {
        &self.data_store
    }

    /// 底层网络模拟器
    pub fn network_simulator(&self) -> &NetworkSimulator {
        &self.network
    }

    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    pub fn searchable_fields(&self) -> &[String] {
        &self.searchable_fields
    }

    /// 合并网络默认参数
    pub fn configure_network(&self, options: NetworkOptions) {
        self.network.set_default_options(options);
    }

    pub fn enable_network_logs(&self, enabled: bool) {
        self.network.enable_logs(enabled);
    }

    /// 模拟网络后运行一次存储上的自定义操作
    ///
    /// 实体服务的扩展查询都经由这里
    pub(crate) async fn with_store<R, F>(
        &self,
        options: &NetworkOptions,
        operation: F,
    ) -> Result<R>
    where
        F: FnOnce(&MockDataStore<T>) -> R + Send,
    {
        self.network.simulate(options).await?;
        Ok(operation(&self.data_store))
    }
}

#[async_trait]
impl<T: Entity> ReadonlyDataService<T> for EnhancedMockService<T> {
    async fn get_all(&self, options: &NetworkOptions) -> Result<DataResult<T>> {
        self.network.simulate(options).await?;

        let data = self.data_store.get_all();
        let count = data.len();
        Ok(DataResult::ok(data, count))
    }

    async fn get_by_id(
        &self,
        id: &EntityId,
        options: &NetworkOptions,
    ) -> Result<EntityResult<T>> {
        self.network.simulate(options).await?;

        Ok(match self.data_store.get_by_id(id) {
            Some(entity) => EntityResult::found(entity),
            None => EntityResult::missing(),
        })
    }

    async fn query(
        &self,
        query: &QueryOptions,
        options: &NetworkOptions,
    ) -> Result<DataResult<T>> {
        self.network.simulate(options).await?;

        let (data, count) = execute(
            self.data_store.get_all(),
            query,
            &self.searchable_fields,
        )?;
        debug!(
            entity = %self.entity_name,
            count,
            returned = data.len(),
            "查询完成"
        );
        Ok(DataResult::ok(data, count))
    }

    async fn download(&self, options: &NetworkOptions) -> Result<Blob> {
        self.network.simulate(options).await?;
        Blob::json(&self.data_store.get_all())
    }
}

#[async_trait]
impl<T: Entity> DataService<T> for EnhancedMockService<T> {
    async fn create(
        &self,
        draft: T::Draft,
        options: &NetworkOptions,
    ) -> Result<EntityResult<T>> {
        self.network.simulate(options).await?;
        Ok(EntityResult::found(self.data_store.create(draft)))
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

        let result = self.data_store.update(id, patch);
        if let Err(e) = &result {
            debug!(entity = %self.entity_name, id = %id, error = %e, "更新失败");
        }
        Ok(result.into())
    }

    async fn delete(&self, id: &EntityId, options: &NetworkOptions) -> Result<bool> {
        self.network.simulate(options).await?;

        let deleted = self.data_store.delete(id);
        debug!(entity = %self.entity_name, id = %id, deleted, "删除实体");
        Ok(deleted)
    }
}
