//! Application configuration structs
//!
//! Loads configuration from environment variables and config files.

use serde::Deserialize;
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub hasher: HasherConfig,
    pub spell_checker: SpellCheckerConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            env: Environment::default(),
        }
    }
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Development,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local)
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "local" => Some(Self::Local),
            "dev" | "development" => Some(Self::Development),
            "prod" | "production" => Some(Self::Production),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Per-request deadline in seconds
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
///
/// `url` wins when set; otherwise the URL is assembled from the parts.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            username: "postgres".to_string(),
            password: String::new(),
            name: "notes".to_string(),
            ssl_mode: "disable".to_string(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            acquire_timeout_secs: 30,
        }
    }
}

impl DatabaseConfig {
    /// Connection URL for the pool
    #[must_use]
    pub fn connection_url(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }
        let credentials = if self.password.is_empty() {
            self.username.clone()
        } else {
            format!("{}:{}", self.username, self.password)
        };
        format!(
            "postgres://{credentials}@{}:{}/{}?sslmode={}",
            self.host, self.port, self.name, self.ssl_mode
        )
    }
}

impl DatabaseConfig {
    /// Load only the database section from environment variables
    ///
    /// # Errors
    /// Returns an error if a value does not parse
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(&|key: &str| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            url: lookup("DATABASE_URL"),
            host: lookup("POSTGRES_HOST").unwrap_or(defaults.host),
            port: parse_or("POSTGRES_PORT", lookup, defaults.port)?,
            username: lookup("POSTGRES_USERNAME").unwrap_or(defaults.username),
            password: lookup("POSTGRES_PASSWORD").unwrap_or_default(),
            name: lookup("POSTGRES_DB").unwrap_or(defaults.name),
            ssl_mode: lookup("POSTGRES_SSLMODE").unwrap_or(defaults.ssl_mode),
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", lookup, defaults.max_connections)?,
            min_connections: parse_or("DATABASE_MIN_CONNECTIONS", lookup, defaults.min_connections)?,
            acquire_timeout_secs: parse_or(
                "DATABASE_ACQUIRE_TIMEOUT",
                lookup,
                defaults.acquire_timeout_secs,
            )?,
        })
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("ssl_mode", &self.ssl_mode)
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .finish_non_exhaustive()
    }
}

/// JWT configuration
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token lifetime in seconds
    pub access_token_expiry: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            access_token_expiry: default_access_token_expiry(),
            refresh_token_expiry: default_refresh_token_expiry(),
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish()
    }
}

/// Argon2 work factor
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct HasherConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            memory_kib: argon2::Params::DEFAULT_M_COST,
            iterations: argon2::Params::DEFAULT_T_COST,
            parallelism: argon2::Params::DEFAULT_P_COST,
        }
    }
}

/// External spell checker configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpellCheckerConfig {
    /// Endpoint URL; spell checking is disabled when unset
    pub url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for SpellCheckerConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: 5,
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "notes-server".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    2
}

fn default_access_token_expiry() -> i64 {
    900 // 15 minutes
}

fn default_refresh_token_expiry() -> i64 {
    2_592_000 // 30 days
}

const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Upper bound for any token lifetime (ten years)
const MAX_TOKEN_TTL_SECS: i64 = 315_360_000;

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an optional file, overridden by `NOTES__`-prefixed
    /// environment variables (e.g. `NOTES__JWT__SECRET`).
    ///
    /// # Errors
    /// Returns an error if the sources cannot be read or the result is invalid
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("NOTES")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins"),
            )
            .build()
            .map_err(|e| ConfigError::Load(e.to_string()))?;

        let config: Self = settings
            .try_deserialize()
            .map_err(|e| ConfigError::Load(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Build configuration from an arbitrary variable lookup
    ///
    /// # Errors
    /// Returns an error if a required variable is missing or a value does not parse
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let hasher_defaults = HasherConfig::default();

        let config = Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: match lookup("APP_ENV") {
                    Some(raw) => Environment::parse(&raw)
                        .ok_or(ConfigError::InvalidValue("APP_ENV", raw))?,
                    None => Environment::default(),
                },
            },
            api: ServerConfig {
                host: lookup("API_HOST").unwrap_or_else(default_host),
                port: parse_or("API_PORT", &lookup, default_port())?,
                request_timeout_secs: parse_or(
                    "API_REQUEST_TIMEOUT",
                    &lookup,
                    default_request_timeout(),
                )?,
            },
            database: DatabaseConfig::from_lookup(&lookup)?,
            jwt: JwtConfig {
                secret: lookup("JWT_SECRET").ok_or(ConfigError::MissingVar("JWT_SECRET"))?,
                access_token_expiry: parse_or(
                    "ACCESS_TOKEN_TTL",
                    &lookup,
                    default_access_token_expiry(),
                )?,
                refresh_token_expiry: parse_or(
                    "REFRESH_TOKEN_TTL",
                    &lookup,
                    default_refresh_token_expiry(),
                )?,
            },
            hasher: HasherConfig {
                memory_kib: parse_or("ARGON2_MEMORY_KIB", &lookup, hasher_defaults.memory_kib)?,
                iterations: parse_or("ARGON2_ITERATIONS", &lookup, hasher_defaults.iterations)?,
                parallelism: parse_or(
                    "ARGON2_PARALLELISM",
                    &lookup,
                    hasher_defaults.parallelism,
                )?,
            },
            spell_checker: SpellCheckerConfig {
                url: lookup("SPELL_CHECKER_URL").filter(|s| !s.trim().is_empty()),
                timeout_secs: parse_or(
                    "SPELL_CHECKER_TIMEOUT",
                    &lookup,
                    SpellCheckerConfig::default().timeout_secs,
                )?,
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    ///
    /// # Errors
    /// Returns an error describing the first violated constraint
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.is_empty() {
            return Err(ConfigError::MissingVar("JWT_SECRET"));
        }
        if self.app.env.is_production() && self.jwt.secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ConfigError::InvalidValue(
                "JWT_SECRET",
                format!("must be at least {MIN_PRODUCTION_SECRET_LEN} bytes in production"),
            ));
        }
        check_ttl("ACCESS_TOKEN_TTL", self.jwt.access_token_expiry)?;
        check_ttl("REFRESH_TOKEN_TTL", self.jwt.refresh_token_expiry)?;
        Ok(())
    }
}

fn check_ttl(key: &'static str, seconds: i64) -> Result<(), ConfigError> {
    if seconds <= 0 {
        return Err(ConfigError::InvalidValue(key, "must be positive".to_string()));
    }
    if seconds > MAX_TOKEN_TTL_SECS {
        return Err(ConfigError::InvalidValue(
            key,
            format!("must not exceed {MAX_TOKEN_TTL_SECS} seconds"),
        ));
    }
    Ok(())
}

fn parse_or<T, F>(key: &'static str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),

    #[error("Failed to load configuration: {0}")]
    Load(String),
}
