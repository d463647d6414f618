use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::DEFAULT_ACCENT_COLOR,
    entities::{
        dev_log::DevLogEntry,
        media::ProjectMedia,
        option_fields::OptionField,
        validation::{
            validate_accent_color, validate_alias, validate_code, validate_tags,
            validate_tech_stack, validate_url,
        },
    },
    errors::AppError,
    utils::sanitize::sanitize_text,
};

// ───── Status ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ProjectStatus {
    Planning,
    #[default]
    Active,
    Paused,
    Shipped,
    Archived,
}

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, sqlx::FromRow)]
pub struct ProjectRow {
    pub id: String,
    pub code: String,
    pub alias: String,
    pub name_en: String,
    pub name_es: Option<String>,
    pub description_en: String,
    pub description_es: Option<String>,
    pub accent_color: String,
    pub category: String,
    pub status: ProjectStatus,
    pub progress: i64,
    pub tech_stack: Json<Vec<String>>,
    pub tags: Json<Vec<String>>,
    pub external_url: Option<String>,
    pub display_order: i64,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: String,
    pub code: String,
    pub alias: String,
    pub name_en: String,
    pub name_es: Option<String>,
    pub description_en: String,
    pub description_es: Option<String>,
    pub accent_color: String,
    pub category: String,
    pub status: ProjectStatus,
    pub progress: i64,
    pub tech_stack: Vec<String>,
    pub tags: Vec<String>,
    pub external_url: Option<String>,
    pub display_order: i64,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            code: row.code,
            alias: row.alias,
            name_en: row.name_en,
            name_es: row.name_es,
            description_en: row.description_en,
            description_es: row.description_es,
            accent_color: row.accent_color,
            category: row.category,
            status: row.status,
            progress: row.progress,
            tech_stack: row.tech_stack.0,
            tags: row.tags.0,
            external_url: row.external_url,
            display_order: row.display_order,
            featured: row.featured,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Fully-resolved project fields, validated before every insert or update.
#[derive(Debug, Clone, Validate)]
pub struct ProjectDraft {
    #[validate(
        length(min = 1, message = "code is required"),
        custom(function = "validate_code")
    )]
    pub code: String,

    #[validate(custom(function = "validate_alias"))]
    pub alias: String,

    #[validate(length(min = 1, max = 120, message = "name_en is required (max 120 characters)"))]
    pub name_en: String,

    #[validate(length(max = 120, message = "name_es must be at most 120 characters"))]
    pub name_es: Option<String>,

    #[validate(length(min = 1, max = 2000, message = "description_en is required (max 2000 characters)"))]
    pub description_en: String,

    #[validate(length(max = 2000, message = "description_es must be at most 2000 characters"))]
    pub description_es: Option<String>,

    #[validate(custom(function = "validate_accent_color"))]
    pub accent_color: String,

    #[validate(length(min = 1, max = 40, message = "category is required (max 40 characters)"))]
    pub category: String,

    pub status: ProjectStatus,

    #[validate(range(min = 0, max = 100, message = "progress must be between 0 and 100"))]
    pub progress: i64,

    #[validate(custom(function = "validate_tech_stack"))]
    pub tech_stack: Vec<String>,

    #[validate(custom(function = "validate_tags"))]
    pub tags: Vec<String>,

    #[validate(custom(function = "validate_url"))]
    pub external_url: Option<String>,

    pub display_order: i64,
    pub featured: bool,
}

#[derive(Debug)]
pub struct ProjectInsert {
    pub id: String,
    pub draft: ProjectDraft,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub media: Vec<ProjectMedia>,
    pub recent_logs: Vec<DevLogEntry>,
}

#[derive(Debug, Serialize)]
pub struct ProjectDeletedResponse {
    pub id: String,
    pub deleted: bool,
}

// ───── Input & Validation Requests ──────────────────────────────────

/// Body of `POST /api/admin/projects`. Missing strings default to empty so that
/// validation reports them per field instead of failing deserialization.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewProjectRequest {
    pub code: String,
    pub alias: Option<String>,
    pub name_en: String,
    pub name_es: Option<String>,
    pub description_en: String,
    pub description_es: Option<String>,
    pub accent_color: Option<String>,
    pub category: String,
    pub status: Option<ProjectStatus>,
    pub progress: Option<i64>,
    pub tech_stack: Vec<String>,
    pub tags: Vec<String>,
    pub external_url: Option<String>,
    pub display_order: Option<i64>,
    pub featured: Option<bool>,
}

impl NewProjectRequest {
    pub fn into_draft(self) -> ProjectDraft {
        let code = self.code.trim().to_string();
        let name_en = self.name_en.trim().to_string();
        let alias = match self.alias.map(|a| a.trim().to_string()) {
            Some(a) if !a.is_empty() => a,
            _ => derive_alias(&name_en, &code),
        };

        ProjectDraft {
            code,
            alias,
            name_en,
            name_es: non_empty(self.name_es),
            description_en: sanitize_text(&self.description_en),
            description_es: non_empty(self.description_es).map(|d| sanitize_text(&d)),
            accent_color: self.accent_color.unwrap_or_else(|| DEFAULT_ACCENT_COLOR.to_string()),
            category: self.category.trim().to_string(),
            status: self.status.unwrap_or_default(),
            progress: self.progress.unwrap_or(0),
            tech_stack: trim_all(self.tech_stack),
            tags: trim_all(self.tags),
            external_url: non_empty(self.external_url),
            display_order: self.display_order.unwrap_or(0),
            featured: self.featured.unwrap_or(false),
        }
    }
}

/// Body of `PUT /api/admin/projects/{id}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateProjectRequest {
    pub code: OptionField<String>,
    pub alias: OptionField<String>,
    pub name_en: OptionField<String>,
    pub name_es: OptionField<String>,
    pub description_en: OptionField<String>,
    pub description_es: OptionField<String>,
    pub accent_color: OptionField<String>,
    pub category: OptionField<String>,
    pub status: OptionField<ProjectStatus>,
    pub progress: OptionField<i64>,
    pub tech_stack: OptionField<Vec<String>>,
    pub tags: OptionField<Vec<String>>,
    pub external_url: OptionField<String>,
    pub display_order: OptionField<i64>,
    pub featured: OptionField<bool>,
}

impl UpdateProjectRequest {
    /// Merges the patch over `current`. An alias explicitly set to an empty
    /// string is regenerated from the (possibly new) English name.
    pub fn apply(self, current: Project) -> Result<ProjectDraft, AppError> {
        let regenerate_alias = matches!(&self.alias, OptionField::SetToValue(a) if a.trim().is_empty())
            || matches!(self.alias, OptionField::SetToNull);

        let code = self.code.apply_required("code", current.code)?.trim().to_string();
        let name_en = self.name_en.apply_required("name_en", current.name_en)?.trim().to_string();

        let alias = if regenerate_alias {
            derive_alias(&name_en, &code)
        } else {
            self.alias.apply_required("alias", current.alias)?.trim().to_string()
        };

        let description_en = match self.description_en {
            OptionField::SetToValue(d) => sanitize_text(&d),
            other => other.apply_required("description_en", current.description_en)?,
        };
        let description_es = match self.description_es {
            OptionField::SetToValue(d) => non_empty(Some(sanitize_text(&d))),
            other => other.apply_nullable(current.description_es),
        };

        Ok(ProjectDraft {
            code,
            alias,
            name_en,
            name_es: non_empty(self.name_es.apply_nullable(current.name_es)),
            description_en,
            description_es,
            accent_color: self.accent_color.apply_required("accent_color", current.accent_color)?,
            category: self.category.apply_required("category", current.category)?.trim().to_string(),
            status: self.status.apply_required("status", current.status)?,
            progress: self.progress.apply_required("progress", current.progress)?,
            tech_stack: trim_all(self.tech_stack.apply_required("tech_stack", current.tech_stack)?),
            tags: trim_all(self.tags.apply_required("tags", current.tags)?),
            external_url: non_empty(self.external_url.apply_nullable(current.external_url)),
            display_order: self.display_order.apply_required("display_order", current.display_order)?,
            featured: self.featured.apply_required("featured", current.featured)?,
        })
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProjectFilter {
    pub featured: Option<bool>,
    pub category: Option<String>,
    pub status: Option<ProjectStatus>,
}

// ───── Helpers ──────────────────────────────────────────────────────

fn derive_alias(name_en: &str, code: &str) -> String {
    let from_name = slug::slugify(name_en);
    if from_name.is_empty() {
        slug::slugify(code)
    } else {
        from_name
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn trim_all(values: Vec<String>) -> Vec<String> {
    values.into_iter().map(|v| v.trim().to_string()).collect()
}

impl ProjectDraft {
    pub fn prepare_for_insert(self) -> ProjectInsert {
        let now = Utc::now();
        ProjectInsert {
            id: Uuid::new_v4().to_string(),
            draft: self,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> NewProjectRequest {
        NewProjectRequest {
            code: "MM-01".into(),
            name_en: "Sphere HUD".into(),
            description_en: "Live dashboard for the lab".into(),
            category: "web".into(),
            ..Default::default()
        }
    }

    fn sample_project() -> Project {
        let draft = sample_request().into_draft();
        let insert = draft.prepare_for_insert();
        Project {
            id: insert.id,
            code: insert.draft.code,
            alias: insert.draft.alias,
            name_en: insert.draft.name_en,
            name_es: None,
            description_en: insert.draft.description_en,
            description_es: None,
            accent_color: insert.draft.accent_color,
            category: insert.draft.category,
            status: insert.draft.status,
            progress: 10,
            tech_stack: vec!["Rust".into()],
            tags: vec![],
            external_url: Some("https://marcomotion.dev".into()),
            display_order: 0,
            featured: false,
            created_at: insert.created_at,
            updated_at: insert.updated_at,
        }
    }

    #[test]
    fn alias_derived_from_english_name() {
        let draft = sample_request().into_draft();
        assert_eq!(draft.alias, "sphere-hud");
        assert_eq!(draft.accent_color, DEFAULT_ACCENT_COLOR);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn missing_fields_reported_per_field() {
        let draft = NewProjectRequest::default().into_draft();
        let errors = draft.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("code"));
        assert!(fields.contains_key("name_en"));
        assert!(fields.contains_key("description_en"));
        assert!(fields.contains_key("category"));
    }

    #[test]
    fn description_html_is_stripped() {
        let mut request = sample_request();
        request.description_en = "Hello <script>alert(1)</script><b>world</b>".into();

        let draft = request.into_draft();
        assert!(!draft.description_en.contains("<script>"));
        assert!(draft.description_en.contains("world"));
    }

    #[test]
    fn patch_keeps_untouched_fields_and_clears_nullables() {
        let patch: UpdateProjectRequest =
            serde_json::from_str(r#"{"progress": 75, "external_url": null}"#).unwrap();

        let draft = patch.apply(sample_project()).unwrap();
        assert_eq!(draft.progress, 75);
        assert_eq!(draft.external_url, None);
        assert_eq!(draft.code, "MM-01");
        assert_eq!(draft.tech_stack, vec!["Rust".to_string()]);
    }

    #[test]
    fn patch_regenerates_alias_when_blank() {
        let patch: UpdateProjectRequest =
            serde_json::from_str(r#"{"name_en": "Lab Terminal", "alias": ""}"#).unwrap();

        let draft = patch.apply(sample_project()).unwrap();
        assert_eq!(draft.alias, "lab-terminal");
    }

    #[test]
    fn patch_rejects_null_required_field() {
        let patch: UpdateProjectRequest = serde_json::from_str(r#"{"category": null}"#).unwrap();
        assert!(patch.apply(sample_project()).is_err());
    }
}
