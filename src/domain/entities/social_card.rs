use serde::Deserialize;
use validator::Validate;

use crate::entities::validation::validate_accent_color;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardTheme {
    #[default]
    Dark,
    Light,
}

impl CardTheme {
    pub fn background(self) -> &'static str {
        match self {
            CardTheme::Dark => "#0B0F14",
            CardTheme::Light => "#F4F6F8",
        }
    }

    pub fn foreground(self) -> &'static str {
        match self {
            CardTheme::Dark => "#F4F6F8",
            CardTheme::Light => "#0B0F14",
        }
    }

    pub fn muted(self) -> &'static str {
        match self {
            CardTheme::Dark => "#8A96A3",
            CardTheme::Light => "#4A5560",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardFormat {
    /// 1200×630, the Open Graph preview size.
    #[default]
    Og,
    /// 1080×1080.
    Square,
}

impl CardFormat {
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            CardFormat::Og => (1200, 630),
            CardFormat::Square => (1080, 1080),
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct SocialCardRequest {
    #[validate(length(min = 1, max = 80, message = "title is required (max 80 characters)"))]
    pub title: String,

    #[validate(length(max = 140, message = "subtitle must be at most 140 characters"))]
    pub subtitle: Option<String>,

    #[validate(length(max = 24, message = "project_code must be at most 24 characters"))]
    pub project_code: Option<String>,

    #[validate(custom(function = "validate_accent_color"))]
    pub accent_color: Option<String>,

    pub theme: CardTheme,
    pub format: CardFormat,
}
