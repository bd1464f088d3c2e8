//! Object Storage Port - 对象存储抽象
//!
//! 生成音频与克隆样本的持久化存储，具体实现在
//! infrastructure/adapters/storage 层

use async_trait::async_trait;
use thiserror::Error;

/// 存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid object key: {0}")]
    InvalidKey(String),
}

/// 已存储对象的定位信息
#[derive(Debug, Clone)]
pub struct StoredObject {
    /// 存储 key（含用户前缀）
    pub key: String,
    /// 公开访问 URL
    pub url: String,
}

/// Object Storage Port
#[async_trait]
pub trait ObjectStoragePort: Send + Sync {
    /// 写入对象并返回其 key 与公开 URL
    async fn put(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<StoredObject, StorageError>;

    /// 读取对象内容
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError>;

    /// 删除对象（不存在时静默成功）
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}
