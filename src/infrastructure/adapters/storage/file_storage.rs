//! File Storage - 基于本地文件系统的对象存储
//!
//! 实现 ObjectStoragePort trait
//!
//! 对象 key 直接映射为根目录下的相对路径，
//! 公开 URL 形如 `{base_url}/files/{key}`，由 HTTP 层的 /files 路由提供下载。

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

use crate::application::ports::{ObjectStoragePort, StorageError, StoredObject};

/// 本地文件存储
pub struct FileObjectStorage {
    /// 存储根目录
    root_dir: PathBuf,
    /// 公开访问的 Base URL（不含尾部斜杠）
    public_base_url: String,
}

impl FileObjectStorage {
    pub fn new(root_dir: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        let mut public_base_url = public_base_url.into();
        while public_base_url.ends_with('/') {
            public_base_url.pop();
        }
        Self {
            root_dir: root_dir.into(),
            public_base_url,
        }
    }

    /// 校验 key 并解析为根目录下的路径
    ///
    /// 拒绝空 key、绝对路径和包含 `..` 的 key，防止越出根目录
    fn resolve_key(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey("Key cannot be empty".to_string()));
        }

        let path = Path::new(key);
        if path.is_absolute() {
            return Err(StorageError::InvalidKey(format!(
                "Key cannot be absolute: {}",
                key
            )));
        }
        for component in path.components() {
            match component {
                Component::Normal(_) => {}
                _ => {
                    return Err(StorageError::InvalidKey(format!(
                        "Key contains invalid path component: {}",
                        key
                    )));
                }
            }
        }

        Ok(self.root_dir.join(path))
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/files/{}", self.public_base_url, key)
    }
}

#[async_trait]
impl ObjectStoragePort for FileObjectStorage {
    async fn put(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<StoredObject, StorageError> {
        let path = self.resolve_key(key)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::IoError(e.to_string()))?;
        }

        let size = data.len();
        fs::write(&path, data)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?;

        tracing::debug!(key = %key, size, content_type = %content_type, "Object stored");

        Ok(StoredObject {
            key: key.to_string(),
            url: self.object_url(key),
        })
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.resolve_key(key)?;

        match fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(StorageError::IoError(e.to_string())),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.resolve_key(key)?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            // 删除不存在的对象视为成功
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::IoError(e.to_string())),
        }
    }
}
