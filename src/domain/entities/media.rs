use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::validation::{new_validation_error, validate_url};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Gif,
    Video,
    Vimeo,
    Youtube,
}

impl MediaType {
    /// Embeds reference a third-party player and never carry a stored object.
    pub fn is_embed(self) -> bool {
        matches!(self, MediaType::Vimeo | MediaType::Youtube)
    }

    /// Whether a sniffed MIME type is acceptable for this media type.
    pub fn accepts_mime(self, mime: &str) -> bool {
        match self {
            MediaType::Image => mime.starts_with("image/") && mime != "image/gif",
            MediaType::Gif => mime == "image/gif",
            MediaType::Video => mime.starts_with("video/"),
            MediaType::Vimeo | MediaType::Youtube => false,
        }
    }

    /// Hosts an embed URL must point at.
    fn embed_hosts(self) -> &'static [&'static str] {
        match self {
            MediaType::Vimeo => &["vimeo.com", "player.vimeo.com"],
            MediaType::Youtube => &["youtube.com", "www.youtube.com", "m.youtube.com", "youtu.be", "www.youtube-nocookie.com"],
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProjectMedia {
    pub id: i64,
    pub project_id: String,
    pub url: String,
    pub media_type: MediaType,
    pub caption_en: Option<String>,
    pub caption_es: Option<String>,
    pub display_order: i64,
    #[serde(skip_serializing)]
    pub storage_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct MediaInsert {
    pub project_id: String,
    pub url: String,
    pub media_type: MediaType,
    pub caption_en: Option<String>,
    pub caption_es: Option<String>,
    pub display_order: i64,
    pub storage_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Shared metadata for both the JSON and the multipart media flows.
#[derive(Debug, Clone, Validate)]
pub struct MediaMetadata {
    #[validate(length(min = 1, message = "project_id is required"))]
    pub project_id: String,

    pub media_type: MediaType,

    #[validate(length(max = 280, message = "caption_en must be at most 280 characters"))]
    pub caption_en: Option<String>,

    #[validate(length(max = 280, message = "caption_es must be at most 280 characters"))]
    pub caption_es: Option<String>,

    pub display_order: i64,
}

impl MediaMetadata {
    pub fn into_insert(self, url: String, storage_key: Option<String>) -> MediaInsert {
        MediaInsert {
            project_id: self.project_id,
            url,
            media_type: self.media_type,
            caption_en: self.caption_en,
            caption_es: self.caption_es,
            display_order: self.display_order,
            storage_key,
            created_at: Utc::now(),
        }
    }
}

/// JSON body of `POST /api/admin/media` for externally hosted media.
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_embed_host"))]
pub struct NewMediaRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "project_id is required"))]
    pub project_id: String,

    pub media_type: MediaType,

    #[serde(default)]
    #[validate(length(min = 1, message = "url is required"), custom(function = "validate_url"))]
    pub url: String,

    #[validate(length(max = 280, message = "caption_en must be at most 280 characters"))]
    pub caption_en: Option<String>,

    #[validate(length(max = 280, message = "caption_es must be at most 280 characters"))]
    pub caption_es: Option<String>,

    pub display_order: Option<i64>,
}

fn validate_embed_host(request: &NewMediaRequest) -> Result<(), validator::ValidationError> {
    if !request.media_type.is_embed() {
        return Ok(());
    }
    let host = url::Url::parse(&request.url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()));

    match host {
        Some(h) if request.media_type.embed_hosts().contains(&h.as_str()) => Ok(()),
        _ => Err(new_validation_error("embed_host", "Embed URL does not match the media type")),
    }
}

impl NewMediaRequest {
    pub fn split(self) -> (MediaMetadata, String) {
        let metadata = MediaMetadata {
            project_id: self.project_id.trim().to_string(),
            media_type: self.media_type,
            caption_en: clean_caption(self.caption_en),
            caption_es: clean_caption(self.caption_es),
            display_order: self.display_order.unwrap_or(0),
        };
        (metadata, self.url)
    }
}

/// Multipart body of `POST /api/admin/media` carrying a binary upload.
#[derive(MultipartForm)]
pub struct MediaUpload {
    pub file: TempFile,
    pub project_id: Text<String>,
    pub media_type: Text<MediaType>,
    pub caption_en: Option<Text<String>>,
    pub caption_es: Option<Text<String>>,
    pub display_order: Option<Text<i64>>,
}

impl MediaUpload {
    pub fn metadata(&self) -> MediaMetadata {
        MediaMetadata {
            project_id: self.project_id.trim().to_string(),
            media_type: *self.media_type,
            caption_en: clean_caption(self.caption_en.as_ref().map(|c| c.0.clone())),
            caption_es: clean_caption(self.caption_es.as_ref().map(|c| c.0.clone())),
            display_order: self.display_order.as_ref().map(|o| **o).unwrap_or(0),
        }
    }
}

/// Trimmed caption, or `None` when nothing is left.
fn clean_caption(caption: Option<String>) -> Option<String> {
    caption
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

#[derive(Debug, Default, Deserialize)]
pub struct MediaFilter {
    pub project_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MediaDeletedResponse {
    pub id: i64,
    pub deleted: bool,
}
