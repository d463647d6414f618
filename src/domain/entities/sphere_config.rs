use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::{project::ProjectStatus, validation::validate_accent_color};

/// Tunables for the Sphere HUD, stored as one JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SphereConfig {
    #[validate(range(min = 0.5, max = 20.0, message = "radius must be between 0.5 and 20"))]
    pub radius: f64,

    #[validate(range(min = 0.01, max = 2.0, message = "point_size must be between 0.01 and 2"))]
    pub point_size: f64,

    #[validate(range(min = 0.0, max = 5.0, message = "rotation_speed must be between 0 and 5"))]
    pub rotation_speed: f64,

    pub auto_rotate: bool,
    pub show_labels: bool,

    /// Place only featured projects on the lattice.
    pub featured_only: bool,

    #[validate(custom(function = "validate_accent_color"))]
    pub highlight_color: String,
}

impl Default for SphereConfig {
    fn default() -> Self {
        SphereConfig {
            radius: 2.0,
            point_size: 0.08,
            rotation_speed: 0.4,
            auto_rotate: true,
            show_labels: true,
            featured_only: false,
            highlight_color: "#FF3D81".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SphereNode {
    pub project_id: String,
    pub code: String,
    pub alias: String,
    pub accent_color: String,
    pub status: ProjectStatus,
    pub progress: i64,
    pub position: [f64; 3],
}

#[derive(Debug, Serialize)]
pub struct SphereView {
    pub config: SphereConfig,
    pub nodes: Vec<SphereNode>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoredSphereConfig {
    pub config: sqlx::types::Json<SphereConfig>,
    pub updated_at: DateTime<Utc>,
}
