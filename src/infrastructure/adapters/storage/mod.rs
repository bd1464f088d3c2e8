//! 存储适配器 - ObjectStoragePort 的具体实现

mod file_storage;

pub use file_storage::FileObjectStorage;
