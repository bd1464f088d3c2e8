//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::synthesis::PipelineError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到（id 为 UUID 或分享令牌等业务标识）
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 权限不足（资源不属于请求用户）
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// 仓储错误
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// 外部服务错误
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建权限错误
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<crate::application::ports::RepositoryError> for ApplicationError {
    fn from(err: crate::application::ports::RepositoryError) -> Self {
        Self::RepositoryError(err.to_string())
    }
}

impl From<crate::application::ports::StorageError> for ApplicationError {
    fn from(err: crate::application::ports::StorageError) -> Self {
        Self::StorageError(err.to_string())
    }
}

impl From<crate::application::ports::SynthesisError> for ApplicationError {
    fn from(err: crate::application::ports::SynthesisError) -> Self {
        Self::ExternalServiceError(err.to_string())
    }
}

// 分段管线失败对调用方呈现与单片段合成失败相同的形态，
// 片段定位信息保留在错误消息中
impl From<PipelineError> for ApplicationError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Segmentation(e) => Self::ValidationError(e.to_string()),
            other => Self::ExternalServiceError(other.to_string()),
        }
    }
}
