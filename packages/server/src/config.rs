use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

fn default_max_connections() -> u32 {
    20
}
fn default_min_connections() -> u32 {
    1
}
fn default_connect_timeout_secs() -> u64 {
    8
}

impl DatabaseConfig {
    /// Connection string with `sslmode=require` appended for PostgreSQL URLs
    /// that do not choose a mode themselves.
    pub fn connection_url(&self) -> String {
        with_sslmode_require(&self.url)
    }
}

fn with_sslmode_require(url: &str) -> String {
    let is_postgres = url.starts_with("postgres://") || url.starts_with("postgresql://");
    if !is_postgres || url.contains("sslmode=") {
        return url.to_string();
    }
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}sslmode=require")
}

/// Anti-forgery token settings. Protection is off when no secret is set.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SecurityConfig {
    pub csrf_secret: Option<String>,
    #[serde(default = "default_csrf_ttl_secs")]
    pub csrf_ttl_secs: u64,
}

fn default_csrf_ttl_secs() -> u64 {
    8 * 60 * 60
}

#[derive(Debug, Deserialize, Clone)]
pub struct ImageLabConfig {
    #[serde(default = "default_image_lab_enabled")]
    pub enabled: bool,
    /// Falls back to `GEMINI_API_KEY` / `GOOGLE_API_KEY` at call time when unset.
    pub api_key: Option<String>,
    #[serde(default = "default_image_model")]
    pub model: String,
    #[serde(default = "default_image_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_image_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_image_lab_enabled() -> bool {
    true
}
fn default_image_model() -> String {
    "gemini-2.5-flash-image".into()
}
fn default_image_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".into()
}
fn default_image_timeout_secs() -> u64 {
    120
}

impl Default for ImageLabConfig {
    fn default() -> Self {
        Self {
            enabled: default_image_lab_enabled(),
            api_key: None,
            model: default_image_model(),
            endpoint: default_image_endpoint(),
            timeout_secs: default_image_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub image_lab: ImageLabConfig,
}

impl AppConfig {
    /// Load configuration. Fails when no database URL is configured anywhere.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("PROMPTBOARD_CONFIG").unwrap_or_else(|_| "config/config".to_string());

        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            // Load from config/config.toml
            .add_source(File::with_name(&config_path).required(false))
            // Override from environment (e.g., PROMPTBOARD__DATABASE__URL)
            .add_source(Environment::with_prefix("PROMPTBOARD").separator("__"))
            .set_override_option("database.url", non_empty_env("DATABASE_URL"))?
            .set_override_option("security.csrf_secret", non_empty_env("SECRET_KEY"))?
            .set_override_option("image_lab.api_key", non_empty_env("GEMINI_API_KEY"))?
            .build()?;

        let config: Self = s.try_deserialize()?;
        if config.database.url.trim().is_empty() {
            return Err(ConfigError::Message("DATABASE_URL is not set".into()));
        }
        Ok(config)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
