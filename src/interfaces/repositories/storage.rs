use std::time::Duration;

use async_trait::async_trait;

use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub key: String,
    pub age: Duration,
}

/// Object store for uploaded media.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Stores `bytes` under `key`, replacing any existing object
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), AppError>;

    async fn get(&self, key: &str) -> Result<Vec<u8>, AppError>;

    /// Returns false when there was nothing to delete
    async fn delete(&self, key: &str) -> Result<bool, AppError>;

    /// Lists every stored object with its age
    async fn list_objects(&self) -> Result<Vec<StoredObject>, AppError>;

    /// URL clients use to fetch the object
    fn public_url(&self, key: &str) -> String;
}
