use std::borrow::Cow;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

const MAX_TAGS: usize = 10;
const MAX_TAG_LENGTH: usize = 30;
const MAX_TECH_ENTRIES: usize = 20;
const MAX_TECH_LENGTH: usize = 40;
const MAX_ALIAS_LENGTH: usize = 80;

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid hex color regex")
});

static PROJECT_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z0-9][A-Z0-9_-]{1,23}$").expect("valid project code regex")
});

pub fn validate_accent_color(color: &str) -> Result<(), ValidationError> {
    if HEX_COLOR.is_match(color) {
        Ok(())
    } else {
        Err(new_validation_error("invalid_color", "Color must be a hex value like #00E5FF"))
    }
}

/// Empty codes are left to the `required` length rule.
pub fn validate_code(code: &str) -> Result<(), ValidationError> {
    if code.is_empty() || PROJECT_CODE.is_match(code) {
        Ok(())
    } else {
        Err(new_validation_error(
            "invalid_code",
            "Code must be 2-24 uppercase letters, digits, '-' or '_'",
        ))
    }
}

pub fn validate_alias(alias: &str) -> Result<(), ValidationError> {
    if alias.is_empty() {
        return Err(new_validation_error("alias_empty", "Alias could not be derived; provide one"));
    }
    if alias.len() > MAX_ALIAS_LENGTH {
        return Err(new_validation_error("alias_too_long", "Alias must be at most 80 characters"));
    }
    if !alias.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
        return Err(new_validation_error("alias_invalid_chars", "Alias must contain only lowercase letters, digits, or hyphens"));
    }
    if alias.starts_with('-') || alias.ends_with('-') || alias.contains("--") {
        return Err(new_validation_error("alias_hyphens", "Alias must not start, end, or repeat hyphens"));
    }
    Ok(())
}

pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    match url::Url::parse(url) {
        Ok(parsed) => {
            if parsed.scheme() == "http" || parsed.scheme() == "https" {
                Ok(())
            } else {
                Err(new_validation_error("invalid_url_scheme", "URL must start with http:// or https://"))
            }
        }
        Err(_) => Err(new_validation_error("invalid_url", "Invalid URL format")),
    }
}

pub fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    if tags.len() > MAX_TAGS {
        return Err(new_validation_error("too_many_tags", "At most 10 tags are allowed"));
    }
    for tag in tags {
        if tag.is_empty() || tag.len() > MAX_TAG_LENGTH {
            return Err(new_validation_error("invalid_tag_length", "Tags must be 1-30 characters"));
        }
        if !tag.chars().all(|c| c.is_alphanumeric() || c == '-') {
            return Err(new_validation_error("invalid_tag_chars", "Tags must be alphanumeric or hyphens"));
        }
    }
    Ok(())
}

pub fn validate_tech_stack(stack: &[String]) -> Result<(), ValidationError> {
    if stack.len() > MAX_TECH_ENTRIES {
        return Err(new_validation_error("too_many_entries", "At most 20 tech stack entries are allowed"));
    }
    if stack.iter().any(|t| t.trim().is_empty() || t.len() > MAX_TECH_LENGTH) {
        return Err(new_validation_error("invalid_entry_length", "Tech stack entries must be 1-40 characters"));
    }
    Ok(())
}

pub fn validate_not_future(dt: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *dt > Utc::now() {
        return Err(new_validation_error("datetime_future", "Timestamp must not be in the future"));
    }
    Ok(())
}

pub fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accent_color_requires_six_hex_digits() {
        assert!(validate_accent_color("#00E5FF").is_ok());
        assert!(validate_accent_color("#abc").is_err());
        assert!(validate_accent_color("00E5FF").is_err());
    }

    #[test]
    fn project_codes() {
        assert!(validate_code("MM-01").is_ok());
        assert!(validate_code("").is_ok());
        assert!(validate_code("mm-01").is_err());
        assert!(validate_code("X").is_err());
    }

    #[test]
    fn aliases() {
        assert!(validate_alias("sphere-hud").is_ok());
        assert!(validate_alias("Sphere").is_err());
        assert!(validate_alias("-edge").is_err());
        assert!(validate_alias("double--dash").is_err());
    }

    #[test]
    fn tags_and_stack() {
        assert!(validate_tags(&["three-js".into(), "webgl".into()]).is_ok());
        assert!(validate_tags(&["no spaces".into()]).is_err());
        assert!(validate_tech_stack(&["Rust".into(), " ".into()]).is_err());
    }

    #[test]
    fn urls_must_be_http() {
        assert!(validate_url("https://marcomotion.dev").is_ok());
        assert!(validate_url("ftp://marcomotion.dev").is_err());
        assert!(validate_url("not a url").is_err());
    }
}
