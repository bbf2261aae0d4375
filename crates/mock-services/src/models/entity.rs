//! 实体抽象
//!
//! 所有 mock 存储中的记录都以 `id` 字段唯一标识。

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// 实体 ID
///
/// 兼容字符串与数字两种形式，比较时严格区分类型：`"1"` 与 `1` 不相等
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

/// 可存入 `MockDataStore` 的实体
///
/// `Draft` 是去掉 `id` 的创建输入，由存储分配 ID 后通过 `from_draft` 组装。
/// 实体按值传递（`Clone`），调用方拿到的永远是副本。
pub trait Entity:
    Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    type Draft: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// 实体名称，用于错误消息与日志
    const NAME: &'static str;

    fn id(&self) -> &EntityId;

    fn from_draft(id: EntityId, draft: Self::Draft) -> Self;
}
