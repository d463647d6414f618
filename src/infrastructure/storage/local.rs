use std::{
    path::{Path, PathBuf},
    time::SystemTime,
};

use async_trait::async_trait;
use tokio::fs;

use crate::errors::AppError;
use crate::repositories::storage::{MediaStorage, StoredObject};

/// Media objects kept as flat files under one directory.
#[derive(Debug, Clone)]
pub struct LocalMediaStorage {
    root: PathBuf,
    base_url: String,
}

impl LocalMediaStorage {
    pub fn new(root: impl Into<PathBuf>, base_url: &str) -> Self {
        LocalMediaStorage {
            root: root.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Creates the root directory if it does not exist yet.
    pub async fn init(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, AppError> {
        if !is_safe_key(key) {
            return Err(AppError::NotFound("Media object not found".into()));
        }
        Ok(self.root.join(key))
    }
}

/// Keys are single file names: no separators, no traversal, no hidden files.
pub fn is_safe_key(key: &str) -> bool {
    !key.is_empty()
        && key.len() <= 128
        && !key.starts_with('.')
        && !key.contains("..")
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

#[async_trait]
impl MediaStorage for LocalMediaStorage {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), AppError> {
        let path = self.path_for(key)?;
        let tmp = self.root.join(format!(".{}.part", key));

        fs::write(&tmp, bytes).await?;
        if let Err(e) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, AppError> {
        let path = self.path_for(key)?;
        Ok(fs::read(path).await?)
    }

    async fn delete(&self, key: &str) -> Result<bool, AppError> {
        let path = self.path_for(key)?;
        match fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_objects(&self) -> Result<Vec<StoredObject>, AppError> {
        let mut objects = Vec::new();
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(objects),
            Err(e) => return Err(e.into()),
        };

        let now = SystemTime::now();
        while let Some(entry) = entries.next_entry().await? {
            let Some(key) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !is_safe_key(&key) {
                continue;
            }
            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }
            let age = metadata
                .modified()
                .ok()
                .and_then(|modified| now.duration_since(modified).ok())
                .unwrap_or_default();

            objects.push(StoredObject { key, age });
        }

        Ok(objects)
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("marcomotion-storage-{}-{}", name, uuid::Uuid::new_v4()))
    }

    #[test]
    fn rejects_unsafe_keys() {
        assert!(is_safe_key("3f2a.png"));
        assert!(!is_safe_key("../etc/passwd"));
        assert!(!is_safe_key("a/b.png"));
        assert!(!is_safe_key(".hidden"));
        assert!(!is_safe_key(""));
        assert!(!is_safe_key("a\\b"));
    }

    #[actix_rt::test]
    async fn put_get_delete() {
        let storage = LocalMediaStorage::new(temp_root("crud"), "/media/");
        storage.init().await.unwrap();

        storage.put("clip.mp4", b"bytes").await.unwrap();
        assert_eq!(storage.get("clip.mp4").await.unwrap(), b"bytes");
        assert_eq!(storage.public_url("clip.mp4"), "/media/clip.mp4");

        let listed = storage.list_objects().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].key, "clip.mp4");

        assert!(storage.delete("clip.mp4").await.unwrap());
        assert!(!storage.delete("clip.mp4").await.unwrap());
        assert!(matches!(storage.get("clip.mp4").await, Err(AppError::NotFound(_))));

        let _ = fs::remove_dir_all(storage.root()).await;
    }

    #[actix_rt::test]
    async fn traversal_is_not_found() {
        let storage = LocalMediaStorage::new(temp_root("traversal"), "/media");
        assert!(matches!(storage.get("../Cargo.toml").await, Err(AppError::NotFound(_))));
    }
}
