use std::{sync::Arc, time::Duration};

use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::media::{MediaDeletedResponse, MediaMetadata, MediaUpload, NewMediaRequest, ProjectMedia},
    errors::AppError,
    repositories::{media::MediaRepository, project::ProjectRepository, storage::MediaStorage},
};

/// Stored objects younger than this are never swept, so an upload whose
/// row is still being written is not mistaken for an orphan.
pub const ORPHAN_GRACE: Duration = Duration::from_secs(15 * 60);

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

pub struct MediaHandler<M, P>
where
    M: MediaRepository,
    P: ProjectRepository,
{
    pub media_repo: M,
    pub project_repo: P,
    pub storage: Arc<dyn MediaStorage>,
    pub max_upload_bytes: usize,
}

/// A stored object ready to be streamed back.
#[derive(Debug)]
pub struct MediaObject {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

impl<M, P> MediaHandler<M, P>
where
    M: MediaRepository,
    P: ProjectRepository,
{
    pub fn new(media_repo: M, project_repo: P, storage: Arc<dyn MediaStorage>, max_upload_bytes: usize) -> Self {
        MediaHandler {
            media_repo,
            project_repo,
            storage,
            max_upload_bytes,
        }
    }

    pub async fn list_media(&self, project_id: Option<String>) -> Result<Vec<ProjectMedia>, AppError> {
        let project_id = project_id.map(|p| p.trim().to_string()).filter(|p| !p.is_empty());
        self.media_repo.list_media(project_id).await
    }

    /// Registers externally hosted media (embeds or remote files).
    pub async fn create_from_url(&self, request: NewMediaRequest) -> Result<ProjectMedia, AppError> {
        request.validate()?;
        let (metadata, url) = request.split();

        self.ensure_project(&metadata.project_id).await?;

        let media = self.media_repo.create_media(&metadata.into_insert(url, None)).await?;
        tracing::info!(media_id = media.id, project_id = %media.project_id, "External media registered");

        Ok(media)
    }

    /// Stores an uploaded file and records it against its project.
    pub async fn upload(&self, upload: MediaUpload) -> Result<ProjectMedia, AppError> {
        let metadata = upload.metadata();
        metadata.validate()?;

        if metadata.media_type.is_embed() {
            return Err(AppError::field(
                "media_type",
                "Embedded media must be sent as JSON with a url",
            ));
        }
        if upload.file.size == 0 {
            return Err(AppError::field("file", "file is required"));
        }
        if upload.file.size > self.max_upload_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "File exceeds the {} byte limit",
                self.max_upload_bytes
            )));
        }

        self.ensure_project(&metadata.project_id).await?;

        let bytes = tokio::fs::read(upload.file.file.path()).await?;
        self.store(metadata, bytes).await
    }

    async fn store(&self, metadata: MediaMetadata, bytes: Vec<u8>) -> Result<ProjectMedia, AppError> {
        let kind = infer::get(&bytes)
            .ok_or_else(|| AppError::UnsupportedMediaType("Could not detect the file type".into()))?;

        if !metadata.media_type.accepts_mime(kind.mime_type()) {
            return Err(AppError::UnsupportedMediaType(format!(
                "{} does not match the declared media type",
                kind.mime_type()
            )));
        }

        let key = format!("{}.{}", Uuid::new_v4(), kind.extension());
        self.storage.put(&key, &bytes).await?;

        let url = self.storage.public_url(&key);
        match self.media_repo.create_media(&metadata.into_insert(url, Some(key.clone()))).await {
            Ok(media) => {
                tracing::info!(media_id = media.id, key = %key, size = bytes.len(), "Media uploaded");
                Ok(media)
            }
            Err(e) => {
                if let Err(cleanup) = self.storage.delete(&key).await {
                    tracing::warn!(key = %key, "Failed to remove object after insert error: {}", cleanup);
                }
                Err(e)
            }
        }
    }

    /// Deletes the row, then its stored object if it has one.
    pub async fn delete_media(&self, id: i64) -> Result<MediaDeletedResponse, AppError> {
        let media = self
            .media_repo
            .get_media(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Media not found".into()))?;

        if !self.media_repo.delete_media(id).await? {
            return Err(AppError::NotFound("Media not found".into()));
        }

        if let Some(key) = media.storage_key.as_deref() {
            // The orphan sweep retries anything left behind here.
            if let Err(e) = self.storage.delete(key).await {
                tracing::warn!(key = %key, "Failed to delete stored object: {}", e);
            }
        }

        Ok(MediaDeletedResponse { id, deleted: true })
    }

    pub async fn fetch_object(&self, key: &str) -> Result<MediaObject, AppError> {
        let bytes = self.storage.get(key).await?;
        let content_type = infer::get(&bytes)
            .map(|kind| kind.mime_type())
            .unwrap_or(FALLBACK_CONTENT_TYPE);

        Ok(MediaObject { bytes, content_type })
    }

    /// Removes stored objects no media row references. Returns how many went.
    pub async fn sweep_orphans(&self, grace: Duration) -> Result<usize, AppError> {
        let mut removed = 0;

        for object in self.storage.list_objects().await? {
            if object.age < grace {
                continue;
            }
            if self.media_repo.storage_key_in_use(&object.key).await? {
                continue;
            }
            if self.storage.delete(&object.key).await? {
                tracing::debug!(key = %object.key, "Removed orphaned media object");
                removed += 1;
            }
        }

        Ok(removed)
    }

    async fn ensure_project(&self, project_id: &str) -> Result<(), AppError> {
        if self.project_repo.project_exists(project_id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound("Project not found".into()))
        }
    }
}
