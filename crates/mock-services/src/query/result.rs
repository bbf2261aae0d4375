//! 结果信封

use serde::Serialize;
use showcase_shared::{Result, ShowcaseError};

/// JSON 内容类型
pub const APPLICATION_JSON: &str = "application/json";

/// 列表结果
///
/// `count` 为搜索与过滤后、分页前的总数
#[derive(Debug)]
pub struct DataResult<T> {
    pub data: Option<Vec<T>>,
    pub count: usize,
    pub error: Option<ShowcaseError>,
}

impl<T> DataResult<T> {
    pub fn ok(data: Vec<T>, count: usize) -> Self {
        Self {
            data: Some(data),
            count,
            error: None,
        }
    }

    /// 当前页的数据，无数据时为空切片
    pub fn rows(&self) -> &[T] {
        self.data.as_deref().unwrap_or_default()
    }
}

/// 单条结果
///
/// 记录不存在时 `data` 与 `error` 都可能为空，由具体操作决定
#[derive(Debug)]
pub struct EntityResult<T> {
    pub data: Option<T>,
    pub error: Option<ShowcaseError>,
}

impl<T> EntityResult<T> {
    pub fn found(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn missing() -> Self {
        Self {
            data: None,
            error: None,
        }
    }

    pub fn failed(error: ShowcaseError) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    pub fn is_found(&self) -> bool {
        self.data.is_some()
    }

    pub fn into_option(self) -> Option<T> {
        self.data
    }
}

impl<T> From<Result<T>> for EntityResult<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::found(data),
            Err(error) => Self::failed(error),
        }
    }
}

/// 导出的二进制内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

impl Blob {
    /// 序列化为 JSON
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Self {
            bytes: serde_json::to_vec(value)?,
            content_type: APPLICATION_JSON,
        })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
