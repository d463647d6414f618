use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, path::PathBuf, str::FromStr};
use zeroize::Zeroizing;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    #[serde(default)]
    pub token_secret: String,

    #[serde(default = "default_token_ttl")]
    pub token_ttl_hours: i64,

    #[serde(default = "default_media_dir")]
    pub media_dir: PathBuf,

    #[serde(default = "default_media_base_url")]
    pub media_base_url: String,

    #[serde(default = "default_max_upload")]
    pub max_upload_bytes: usize,

    #[serde(default)]
    pub admin_username: Option<String>,

    #[serde(default)]
    pub admin_password: Option<String>,

    #[serde(default = "default_login_attempts")]
    pub login_max_attempts: u64,

    #[serde(default = "default_login_window")]
    pub login_window_secs: u64,

    #[serde(default)]
    pub trust_forwarded_for: bool,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "MarcoMotion-API".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_database_url() -> String {
    "sqlite://marcomotion.db?mode=rwc".to_string()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_token_ttl() -> i64 {
    24
}
fn default_media_dir() -> PathBuf {
    PathBuf::from("./media")
}
fn default_media_base_url() -> String {
    "/media".to_string()
}
fn default_max_upload() -> usize {
    25 * 1024 * 1024
}
fn default_login_attempts() -> u64 {
    5
}
fn default_login_window() -> u64 {
    300
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_allowed_origins")
                    .ignore_empty(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // Inject critical env values if missing
        config.token_secret = fill_or_env(config.token_secret, "APP_TOKEN_SECRET")?;

        config.validate()?;
        Ok(config)
    }

    /// Defaults suitable for tests: in-memory database, throwaway media dir.
    pub fn for_testing(media_dir: PathBuf) -> Self {
        AppConfig {
            env: AppEnvironment::Testing,
            name: "MarcoMotion-API-Test".to_string(),
            port: 0,
            host: default_host(),
            worker_count: 1,
            database_url: "sqlite::memory:".to_string(),
            cors_allowed_origins: default_cors_origins(),
            token_secret: "test_token_secret_that_is_long_enough_1234567890".to_string(),
            token_ttl_hours: 1,
            media_dir,
            media_base_url: default_media_base_url(),
            max_upload_bytes: 1024 * 1024,
            admin_username: None,
            admin_password: None,
            login_max_attempts: default_login_attempts(),
            login_window_secs: default_login_window(),
            trust_forwarded_for: false,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.database_url.trim().is_empty() {
            errors.push("DATABASE_URL cannot be empty");
        }
        if self.token_secret.len() < 32 {
            errors.push("TOKEN_SECRET must be at least 32 characters");
        }
        if self.token_ttl_hours <= 0 {
            errors.push("TOKEN_TTL_HOURS must be positive");
        }
        if self.login_max_attempts == 0 {
            errors.push("LOGIN_MAX_ATTEMPTS must be positive");
        }
        if self.admin_username.is_some() != self.admin_password.is_some() {
            errors.push("ADMIN_USERNAME and ADMIN_PASSWORD must be set together");
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn token_key(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.token_secret.as_bytes().to_vec())
    }
}

fn fill_or_env(current: String, env_key: &str) -> Result<String, ConfigError> {
    if current.trim().is_empty() {
        env::var(env_key).map_err(|_| ConfigError::Message(format!("{env_key} must be set")))
    } else {
        Ok(current)
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else if self.len() < 32 {
            "[TOO_SHORT]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for String {
    fn redact(&self) -> &str {
        self.as_str().redact()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("database_url", &self.database_url)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("token_secret", &self.token_secret.redact())
            .field("token_ttl_hours", &self.token_ttl_hours)
            .field("media_dir", &self.media_dir)
            .field("media_base_url", &self.media_base_url)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("admin_username", &self.admin_username)
            .field("admin_password", &self.admin_password.as_ref().map(|_| "[REDACTED]"))
            .field("login_max_attempts", &self.login_max_attempts)
            .field("login_window_secs", &self.login_window_secs)
            .field("trust_forwarded_for", &self.trust_forwarded_for)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_secret_is_rejected() {
        let mut config = AppConfig::for_testing(PathBuf::from("/tmp"));
        config.token_secret = "short".into();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("TOKEN_SECRET"));
    }

    #[test]
    fn wildcard_cors_rejected_in_production() {
        let mut config = AppConfig::for_testing(PathBuf::from("/tmp"));
        config.env = AppEnvironment::Production;

        assert!(config.validate().is_err());

        config.cors_allowed_origins = vec!["https://marcomotion.dev, https://admin.marcomotion.dev".into()];
        assert!(config.validate().is_ok());
        assert_eq!(config.cors_origins().len(), 2);
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let mut config = AppConfig::for_testing(PathBuf::from("/tmp"));
        config.admin_password = Some("Sup3r-Secret!".into());

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains(&config.token_secret));
        assert!(!rendered.contains("Sup3r-Secret!"));
    }
}
