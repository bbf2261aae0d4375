//! 统一错误处理模块
//!
//! 定义 mock 数据层共享的错误类型，使用 thiserror 提供良好的错误信息。
//!
//! 错误分为两类：
//! - 模拟网络故障（`Network`）：由网络模拟器注入，服务层原样向上传播
//! - 领域错误（`NotFound` 等）：存储层以 `Err` 返回，服务层转换为结果值

use thiserror::Error;

/// 系统错误类型
#[derive(Debug, Error)]
pub enum ShowcaseError {
    // ==================== 网络模拟错误 ====================
    /// 模拟的瞬时网络故障，只携带配置的错误消息
    #[error("{0}")]
    Network(String),

    // ==================== 数据错误 ====================
    #[error("记录未找到: {entity} id={id}")]
    NotFound { entity: String, id: String },

    #[error("无效的更新数据: {0}")]
    InvalidPatch(String),

    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    // ==================== 配置错误 ====================
    #[error("配置错误: {0}")]
    Config(#[from] config::ConfigError),

    // ==================== 验证错误 ====================
    #[error("无效的参数: {field} - {message}")]
    InvalidArgument { field: String, message: String },
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, ShowcaseError>;

impl ShowcaseError {
    /// 构造记录未找到错误
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Network(_) => "NETWORK_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InvalidPatch(_) => "INVALID_PATCH",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::InvalidArgument { .. } => "INVALID_ARGUMENT",
        }
    }

    /// 是否为可重试错误
    ///
    /// 只有模拟网络故障属于运行时条件，其余都是逻辑结果。
    /// 本库不内置重试，由调用方决定策略。
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// 是否为记录未找到
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        let err = ShowcaseError::not_found("Product", "prod_123");
        assert_eq!(err.code(), "NOT_FOUND");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "记录未找到: Product id=prod_123");
    }

    #[test]
    fn test_is_retryable() {
        let network = ShowcaseError::Network("Network error occurred".to_string());
        assert!(network.is_retryable());
        // 网络错误只携带消息本身
        assert_eq!(network.to_string(), "Network error occurred");

        let not_found = ShowcaseError::not_found("User", 42);
        assert!(!not_found.is_retryable());
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ShowcaseError = json_err.into();
        assert_eq!(err.code(), "SERIALIZATION_ERROR");
    }
}
