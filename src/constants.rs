use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Bytes of the HMAC-SHA256 tag kept in an admin token signature.
pub const TOKEN_SIGNATURE_BYTES: usize = 16;

pub const DEFAULT_ACTIVITY_DAYS: u32 = 30;
pub const MAX_ACTIVITY_DAYS: u32 = 365;

pub const DEFAULT_LOG_LIMIT: u32 = 20;
pub const MAX_LOG_LIMIT: u32 = 100;

/// Logs embedded in a project detail response.
pub const PROJECT_DETAIL_LOGS: u32 = 10;

pub const DEFAULT_ACCENT_COLOR: &str = "#00E5FF";
