use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{entities::validation::validate_not_future, utils::sanitize::sanitize_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum EntryType {
    Build,
    Ship,
    Experiment,
    Polish,
    Study,
    Wire,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct DevLog {
    pub id: i64,
    pub project_id: String,
    pub entry_type: EntryType,
    pub one_liner: String,
    pub challenge: Option<String>,
    pub mental_note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A log joined with the owning project's display fields, as the Lab Terminal shows it.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct DevLogEntry {
    pub id: i64,
    pub project_id: String,
    pub project_code: String,
    pub project_alias: String,
    pub accent_color: String,
    pub entry_type: EntryType,
    pub one_liner: String,
    pub challenge: Option<String>,
    pub mental_note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct NewDevLogRequest {
    #[validate(length(min = 1, message = "project_id is required"))]
    pub project_id: String,

    #[validate(required(message = "entry_type is required"))]
    pub entry_type: Option<EntryType>,

    #[validate(length(min = 1, max = 140, message = "one_liner is required (max 140 characters)"))]
    pub one_liner: String,

    #[validate(length(max = 2000, message = "challenge must be at most 2000 characters"))]
    pub challenge: Option<String>,

    #[validate(length(max = 2000, message = "mental_note must be at most 2000 characters"))]
    pub mental_note: Option<String>,

    /// Backdating is allowed; future timestamps are not.
    #[validate(custom(function = "validate_not_future"))]
    pub created_at: Option<DateTime<Utc>>,
}

/// Cleaned log ready for storage. Validate it too: stripped markup can leave
/// an empty one_liner.
#[derive(Debug, Validate)]
pub struct DevLogInsert {
    pub project_id: String,
    pub entry_type: EntryType,
    #[validate(length(min = 1, max = 140, message = "one_liner is required (max 140 characters)"))]
    pub one_liner: String,
    pub challenge: Option<String>,
    pub mental_note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewDevLogRequest {
    /// Call after `validate()`, then validate the result. A missing entry
    /// type falls back to `build`.
    pub fn prepare_for_insert(self) -> DevLogInsert {
        DevLogInsert {
            project_id: self.project_id.trim().to_string(),
            entry_type: self.entry_type.unwrap_or(EntryType::Build),
            one_liner: sanitize_text(self.one_liner.trim()),
            challenge: clean_optional(self.challenge),
            mental_note: clean_optional(self.mental_note),
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}

fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| sanitize_text(v.trim()))
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct LogFilter {
    pub project_id: Option<String>,
    #[serde(rename = "type")]
    pub entry_type: Option<EntryType>,
    pub limit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn entry_type_is_required() {
        let request = NewDevLogRequest {
            project_id: "p-1".into(),
            one_liner: "Wired the radar".into(),
            ..Default::default()
        };

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("entry_type"));
    }

    #[test]
    fn future_timestamps_rejected() {
        let request = NewDevLogRequest {
            project_id: "p-1".into(),
            entry_type: Some(EntryType::Ship),
            one_liner: "Shipped v2".into(),
            created_at: Some(Utc::now() + Duration::days(2)),
            ..Default::default()
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn blank_optional_notes_dropped() {
        let request = NewDevLogRequest {
            project_id: " p-1 ".into(),
            entry_type: Some(EntryType::Study),
            one_liner: "Read about lattices".into(),
            mental_note: Some("   ".into()),
            ..Default::default()
        };

        let insert = request.prepare_for_insert();
        assert_eq!(insert.project_id, "p-1");
        assert_eq!(insert.mental_note, None);
    }

    #[test]
    fn markup_only_one_liner_fails_after_cleaning() {
        let request = NewDevLogRequest {
            project_id: "p-1".into(),
            entry_type: Some(EntryType::Build),
            one_liner: "<b></b><script>x</script>".into(),
            ..Default::default()
        };
        assert!(request.validate().is_ok());

        let errors = request.prepare_for_insert().validate().unwrap_err();
        assert!(errors.field_errors().contains_key("one_liner"));
    }

    #[test]
    fn entry_types_parse_lowercase() {
        let parsed: EntryType = serde_json::from_str("\"experiment\"").unwrap();
        assert_eq!(parsed, EntryType::Experiment);
        assert!(serde_json::from_str::<EntryType>("\"dance\"").is_err());
    }
}
