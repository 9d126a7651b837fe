use std::env;
use std::fmt;

use config::builder::ConfigBuilder;
use config::builder::DefaultState;
use config::Config as ConfigSource;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Environment variable accepted as an override for `jwt.secret`.
pub const SECRET_OVERRIDE_VAR: &str = "JWT_SECRET_KEY";

/// Longest accepted session lifetime (one day).
pub const MAX_TTL_MINUTES: i64 = 24 * 60;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { http_port: 8080 }
    }
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: i64,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default)]
    pub secure_cookie: bool,
}

impl SessionConfig {
    /// Session lifetime.
    ///
    /// # Errors
    /// * `Message` - `ttl_minutes` is not within `1..=MAX_TTL_MINUTES`
    pub fn ttl(&self) -> Result<chrono::Duration, ConfigError> {
        if !(1..=MAX_TTL_MINUTES).contains(&self.ttl_minutes) {
            return Err(ConfigError::Message(format!(
                "session.ttl_minutes must be between 1 and {}, got {}",
                MAX_TTL_MINUTES, self.ttl_minutes
            )));
        }

        chrono::Duration::try_minutes(self.ttl_minutes).ok_or_else(|| {
            ConfigError::Message(format!(
                "session.ttl_minutes out of range: {}",
                self.ttl_minutes
            ))
        })
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_ttl_minutes(),
            cookie_name: default_cookie_name(),
            secure_cookie: false,
        }
    }
}

fn default_ttl_minutes() -> i64 {
    5
}

fn default_cookie_name() -> String {
    "token".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. `JWT_SECRET_KEY` (for `jwt.secret` only)
    /// 2. Environment variables (JWT__SECRET, DATABASE__URL, SESSION__TTL_MINUTES, etc.)
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let builder = ConfigSource::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__"));

        Self::from_builder(builder, env::var(SECRET_OVERRIDE_VAR).ok())
    }

    fn from_builder(
        builder: ConfigBuilder<DefaultState>,
        secret_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        let config: Config = builder
            .set_override_option("jwt.secret", secret_override)?
            .build()?
            .try_deserialize()?;

        config.session.ttl()?;

        Ok(config)
    }
}
