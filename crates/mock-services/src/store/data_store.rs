//! 内存数据存储
//!
//! 单一实体集合的唯一数据源，保持插入顺序并保证 `id` 唯一。
//! 所有读写都按值传递，调用方无法通过持有的对象修改内部状态。

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use serde_json::{Map, Value};
use showcase_shared::{Result, ShowcaseError};
use tracing::debug;

use crate::models::{Entity, EntityId};
use crate::utils::generate_random_id;

/// ID 生成函数
pub type IdGenerator = Arc<dyn Fn() -> EntityId + Send + Sync>;

/// 生成 `{prefix}{8 位随机字符}` 形式 ID 的生成器
pub fn prefixed_id_generator(prefix: &'static str) -> IdGenerator {
    Arc::new(move || EntityId::from(generate_random_id(prefix)))
}

/// 存储配置
pub struct MockDataStoreOptions<T> {
    /// 初始数据
    pub initial_data: Vec<T>,
    /// 自定义 ID 生成器，缺省时生成 8 位随机字符串
    pub id_generator: Option<IdGenerator>,
    /// 实体名称，用于错误消息
    pub entity_name: String,
}

impl<T> Default for MockDataStoreOptions<T> {
    fn default() -> Self {
        Self {
            initial_data: Vec::new(),
            id_generator: None,
            entity_name: "Entity".to_string(),
        }
    }
}

/// 通用内存存储
///
/// 基于 `RwLock<Vec<T>>` 实现，锁只在同步操作内部持有，不会跨越 await。
/// `Clone` 得到的是同一份数据的共享句柄。
pub struct MockDataStore<T> {
    entities: Arc<RwLock<Vec<T>>>,
    id_generator: IdGenerator,
    entity_name: String,
}

impl<T: Entity> Default for MockDataStore<T> {
    fn default() -> Self {
        Self::new(MockDataStoreOptions::default())
    }
}

impl<T> Clone for MockDataStore<T> {
    fn clone(&self) -> Self {
        Self {
            entities: Arc::clone(&self.entities),
            id_generator: Arc::clone(&self.id_generator),
            entity_name: self.entity_name.clone(),
        }
    }
}

impl<T> fmt::Debug for MockDataStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockDataStore")
            .field("entity_name", &self.entity_name)
            .field("count", &self.entities.read().len())
            .finish()
    }
}

impl<T: Entity> MockDataStore<T> {
    /// 创建新的存储实例
    pub fn new(options: MockDataStoreOptions<T>) -> Self {
        let store = Self {
            entities: Arc::new(RwLock::new(Vec::new())),
            id_generator: options
                .id_generator
                .unwrap_or_else(|| prefixed_id_generator("")),
            entity_name: options.entity_name,
        };
        store.set_all(options.initial_data);
        store
    }

    /// 创建带初始数据的存储
    pub fn with_data(initial_data: Vec<T>) -> Self {
        Self::new(MockDataStoreOptions {
            initial_data,
            entity_name: T::NAME.to_string(),
            ..Default::default()
        })
    }

    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    /// 列出所有数据，保持插入顺序
    pub fn get_all(&self) -> Vec<T> {
        self.entities.read().clone()
    }

    /// 按 ID 获取数据
    pub fn get_by_id(&self, id: &EntityId) -> Option<T> {
        self.entities.read().iter().find(|e| e.id() == id).cloned()
    }

    /// 创建实体
    ///
    /// ID 由配置的生成器产生，不再检查冲突
    pub fn create(&self, draft: T::Draft) -> T {
        let entity = T::from_draft((self.id_generator)(), draft);
        self.entities.write().push(entity.clone());
        debug!(entity = %self.entity_name, id = %entity.id(), "创建实体");
        entity
    }

    /// 浅合并更新实体
    ///
    /// `patch` 必须序列化为 JSON 对象，其中的 `id` 字段会被忽略。
    /// 实体不存在时返回 `NotFound`。
    pub fn update<P>(&self, id: &EntityId, patch: &P) -> Result<T>
    where
        P: Serialize + ?Sized,
    {
        let patch = patch_object(patch)?;
        let mut entities = self.entities.write();

        let slot = entities
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or_else(|| ShowcaseError::not_found(&self.entity_name, id))?;

        let updated = merge_patch(slot, &patch)?;
        *slot = updated.clone();
        Ok(updated)
    }

    /// 删除实体，返回是否删除成功
    pub fn delete(&self, id: &EntityId) -> bool {
        let mut entities = self.entities.write();
        match entities.iter().position(|e| e.id() == id) {
            Some(index) => {
                entities.remove(index);
                true
            }
            None => false,
        }
    }

    /// 替换全部数据
    ///
    /// 输入中重复的 ID 以后出现者为准
    pub fn set_all(&self, entities: Vec<T>) {
        let mut deduped: Vec<T> = Vec::with_capacity(entities.len());
        for entity in entities {
            upsert(&mut deduped, entity);
        }
        *self.entities.write() = deduped;
    }

    /// 批量添加数据
    ///
    /// 已存在的 ID 原位覆盖，保证 ID 唯一
    pub fn add_many<I>(&self, entities: I)
    where
        I: IntoIterator<Item = T>,
    {
        let mut guard = self.entities.write();
        for entity in entities {
            upsert(&mut guard, entity);
        }
    }

    /// 清空所有数据
    pub fn clear(&self) {
        self.entities.write().clear();
    }

    /// 获取数据总数
    pub fn count(&self) -> usize {
        self.entities.read().len()
    }

    /// 按条件筛选数据
    pub fn filter<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.entities
            .read()
            .iter()
            .filter(|e| predicate(e))
            .cloned()
            .collect()
    }

    /// 映射每个实体
    ///
    /// 映射函数拿到的是副本
    pub fn map<R, F>(&self, mapper: F) -> Vec<R>
    where
        F: Fn(T) -> R,
    {
        self.get_all().into_iter().map(mapper).collect()
    }

    /// 检查是否存在指定 ID
    pub fn exists(&self, id: &EntityId) -> bool {
        self.entities.read().iter().any(|e| e.id() == id)
    }

    /// 批量更新满足条件的实体，返回更新数量
    ///
    /// 任意一条合并失败时整体不生效
    pub fn update_many<F, P>(&self, predicate: F, patch: &P) -> Result<usize>
    where
        F: Fn(&T) -> bool,
        P: Serialize + ?Sized,
    {
        let patch = patch_object(patch)?;
        let mut entities = self.entities.write();

        let mut updates = Vec::new();
        for (index, entity) in entities.iter().enumerate() {
            if predicate(entity) {
                updates.push((index, merge_patch(entity, &patch)?));
            }
        }

        let count = updates.len();
        for (index, updated) in updates {
            entities[index] = updated;
        }
        Ok(count)
    }

    /// 批量删除满足条件的实体，返回删除数量
    pub fn delete_many<F>(&self, predicate: F) -> usize
    where
        F: Fn(&T) -> bool,
    {
        let mut entities = self.entities.write();
        let before = entities.len();
        entities.retain(|e| !predicate(e));
        before - entities.len()
    }
}

pub(crate) fn upsert<T: Entity>(entities: &mut Vec<T>, entity: T) {
    match entities.iter_mut().find(|e| e.id() == entity.id()) {
        Some(existing) => *existing = entity,
        None => entities.push(entity),
    }
}

/// 将补丁序列化为 JSON 对象，并去掉 `id`
pub(crate) fn patch_object<P>(patch: &P) -> Result<Map<String, Value>>
where
    P: Serialize + ?Sized,
{
    match serde_json::to_value(patch)? {
        Value::Object(mut map) => {
            map.remove("id");
            Ok(map)
        }
        other => Err(ShowcaseError::InvalidPatch(format!(
            "补丁必须是 JSON 对象，实际为 {other}"
        ))),
    }
}

/// 将补丁字段逐个覆盖到实体上
pub(crate) fn merge_patch<T: Entity>(entity: &T, patch: &Map<String, Value>) -> Result<T> {
    let mut value = serde_json::to_value(entity)?;
    if let Value::Object(fields) = &mut value {
        for (key, field) in patch {
            fields.insert(key.clone(), field.clone());
        }
    }
    serde_json::from_value(value).map_err(|e| ShowcaseError::InvalidPatch(e.to_string()))
}
