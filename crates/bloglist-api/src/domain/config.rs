//! Service configuration with validation.
//!
//! Values come from [`ServiceConfig::default`], optionally a TOML file, then
//! `BLOGLIST_*` environment overrides. [`ServiceConfig::validate`] runs last.
//!
//! ```toml
//! shutdown_grace = "5s"
//!
//! [http]
//! host = "0.0.0.0"
//! port = 3003
//!
//! [auth]
//! secret = "change-me"
//! token_ttl = "1h"
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding `http.host`
pub const ENV_HOST: &str = "BLOGLIST_HOST";
/// Environment variable overriding `http.port`
pub const ENV_PORT: &str = "BLOGLIST_PORT";
/// Environment variable overriding `auth.secret`
pub const ENV_SECRET: &str = "BLOGLIST_SECRET";
/// Environment variable overriding `auth.token_ttl`
pub const ENV_TOKEN_TTL: &str = "BLOGLIST_TOKEN_TTL";

/// Main service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP listener
    pub http: HttpConfig,
    /// Tokens and credential rules
    pub auth: AuthConfig,
    /// CORS policy
    pub cors: CorsConfig,
    /// How long in-flight requests may drain after shutdown is requested
    #[serde(with = "humantime_serde")]
    pub shutdown_grace: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            auth: AuthConfig::default(),
            cors: CorsConfig::default(),
            shutdown_grace: Duration::from_secs(5),
        }
    }
}

impl ServiceConfig {
    /// Parse configuration from a TOML string; missing keys take defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_toml_str(&content)
    }

    /// Apply `BLOGLIST_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.http.host = host.parse().map_err(|_| ConfigError::env(ENV_HOST, &host))?;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.http.port = port.parse().map_err(|_| ConfigError::env(ENV_PORT, &port))?;
        }
        if let Some(secret) = lookup(ENV_SECRET) {
            self.auth.secret = secret;
        }
        if let Some(ttl) = lookup(ENV_TOKEN_TTL) {
            self.auth.token_ttl =
                humantime_serde::parse_duration(&ttl).map_err(|_| ConfigError::env(ENV_TOKEN_TTL, &ttl))?;
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.secret.trim().is_empty() {
            return Err(ConfigError::MissingSecret);
        }

        if self.http.port == 0 {
            return Err(ConfigError::InvalidLimit("http.port cannot be 0".into()));
        }

        if self.http.max_body_bytes == 0 {
            return Err(ConfigError::InvalidLimit("http.max_body_bytes cannot be 0".into()));
        }

        if self.auth.password_min_length == 0 || self.auth.username_min_length == 0 {
            return Err(ConfigError::InvalidLimit(
                "minimum credential lengths cannot be 0".into(),
            ));
        }

        if self.auth.argon2_memory_kib < 8 || self.auth.argon2_iterations == 0 {
            return Err(ConfigError::InvalidLimit(
                "argon2 needs at least 8 KiB and 1 iteration".into(),
            ));
        }

        Ok(())
    }

    /// HTTP bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 3003)
    pub port: u16,
    /// Max request body size in bytes (default: 1MB)
    pub max_body_bytes: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 3003,
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// Authentication configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC key for signing tokens; must be set before the service starts
    pub secret: String,
    /// Token lifetime, `0s` issues tokens that never expire
    #[serde(with = "humantime_serde")]
    pub token_ttl: Duration,
    /// Minimum password length at registration
    pub password_min_length: usize,
    /// Minimum username length at registration
    pub username_min_length: usize,
    /// Argon2 memory cost in KiB
    pub argon2_memory_kib: u32,
    /// Argon2 iteration count
    pub argon2_iterations: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            token_ttl: Duration::from_secs(60 * 60),
            password_min_length: 3,
            username_min_length: 3,
            argon2_memory_kib: 19 * 1024,
            argon2_iterations: 2,
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &if self.secret.is_empty() { "<unset>" } else { "<redacted>" })
            .field("token_ttl", &self.token_ttl)
            .field("password_min_length", &self.password_min_length)
            .field("username_min_length", &self.username_min_length)
            .field("argon2_memory_kib", &self.argon2_memory_kib)
            .field("argon2_iterations", &self.argon2_iterations)
            .finish()
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Enable CORS
    pub enabled: bool,
    /// Allowed origins ("*" for all)
    pub allowed_origins: Vec<String>,
    /// Allowed methods
    pub allowed_methods: Vec<String>,
    /// Allowed headers ("*" for all)
    pub allowed_headers: Vec<String>,
    /// Max age for preflight cache, in seconds
    pub max_age: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec!["*".to_string()],
            allowed_methods: ["GET", "POST", "PUT", "DELETE", "OPTIONS"]
                .iter()
                .map(|m| m.to_string())
                .collect(),
            allowed_headers: vec!["Content-Type".to_string(), "Authorization".to_string()],
            max_age: 86400,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// No signing secret configured
    #[error("auth.secret must be set (or BLOGLIST_SECRET)")]
    MissingSecret,
    /// Invalid size or count limit
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
    /// Environment override could not be parsed
    #[error("invalid value for {var}: {value:?}")]
    Env { var: &'static str, value: String },
    /// Config file could not be read
    #[error("failed to read {path}: {error}")]
    Io { path: String, error: String },
    /// Config file is not valid TOML for this schema
    #[error("failed to parse config: {0}")]
    Parse(String),
}

impl ConfigError {
    fn env(var: &'static str, value: &str) -> Self {
        Self::Env {
            var,
            value: value.to_string(),
        }
    }
}

/// Duration (de)serialization as `"90s"`, `"250ms"`, `"15m"`, `"1h"` or bare seconds.
mod humantime_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if duration.subsec_millis() != 0 {
            serializer.serialize_str(&format!("{}ms", duration.as_millis()))
        } else {
            serializer.serialize_str(&format!("{}s", duration.as_secs()))
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_duration(&s).map_err(serde::de::Error::custom)
    }

    pub fn parse_duration(s: &str) -> Result<Duration, &'static str> {
        let s = s.trim();
        let (digits, unit_ms) = if let Some(ms) = s.strip_suffix("ms") {
            (ms, 1)
        } else if let Some(secs) = s.strip_suffix('s') {
            (secs, 1_000)
        } else if let Some(mins) = s.strip_suffix('m') {
            (mins, 60_000)
        } else if let Some(hours) = s.strip_suffix('h') {
            (hours, 3_600_000)
        } else {
            (s, 1_000)
        };

        digits
            .trim()
            .parse::<u64>()
            .map(|n| Duration::from_millis(n.saturating_mul(unit_ms)))
            .map_err(|_| "invalid duration format")
    }
}
