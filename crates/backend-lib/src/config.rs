// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::auth::PasswordRequirements;
use crate::session::{ExemptionSet, GateConfig};

/// Prefix of environment overrides, e.g. `WEBOOK_SESSION__MAX_AGE_SECS=120`.
pub const ENV_PREFIX: &str = "WEBOOK_";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub session: SessionSettings,
    pub auth: AuthSettings,
    pub password: PasswordSettings,
    pub cors: CorsSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding `users.json`
    pub path: PathBuf,
}

/// Session cookie and refresh timings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub cookie_name: String,
    /// Minimum time between two refreshes of one session
    pub refresh_interval_ms: u64,
    /// Lifetime granted by login and by each refresh
    pub max_age_secs: u64,
    /// Adds the `Secure` attribute to the session cookie
    pub secure_cookie: bool,
    /// Period of the expired-session sweep
    pub cleanup_interval_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// Exact request paths reachable without login
    pub ignore_paths: Vec<String>,
}

/// Password complexity requirements and hashing cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordSettings {
    pub min_length: usize,
    pub require_letter: bool,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_digit: bool,
    pub require_special: bool,
    /// scrypt cost parameter (log2 of N)
    pub scrypt_log_n: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsSettings {
    /// Origins containing this string are allowed
    pub allowed_origin_suffix: String,
    /// Allow every `http://` origin (local development)
    pub allow_any_http_origin: bool,
    /// Preflight cache duration
    pub max_age_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            server: ServerSettings::default(),
            storage: StorageSettings::default(),
            session: SessionSettings::default(),
            auth: AuthSettings::default(),
            password: PasswordSettings::default(),
            cors: CorsSettings::default(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data"),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            cookie_name: "mysession".to_string(),
            refresh_interval_ms: 10_000,
            max_age_secs: 60,
            secure_cookie: false,
            cleanup_interval_secs: 60,
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            ignore_paths: vec![
                "/users/signup".to_string(),
                "/users/login".to_string(),
                "/health".to_string(),
            ],
        }
    }
}

impl Default for PasswordSettings {
    fn default() -> Self {
        let requirements = PasswordRequirements::default();
        Self {
            min_length: requirements.min_length,
            require_letter: requirements.require_letter,
            require_uppercase: requirements.require_uppercase,
            require_lowercase: requirements.require_lowercase,
            require_digit: requirements.require_digit,
            require_special: requirements.require_special,
            scrypt_log_n: 15,
        }
    }
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origin_suffix: "your_company.com".to_string(),
            allow_any_http_origin: true,
            max_age_secs: 12 * 60 * 60,
        }
    }
}

impl Settings {
    /// Load from `config.{toml,yaml,json}` in the working directory, then
    /// `WEBOOK_*` environment variables, over the defaults.
    pub fn load() -> Result<Self> {
        let settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file("config.toml"))
            .merge(Yaml::file("config.yaml"))
            .merge(Json::file("config.json"))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("failed to load settings")?;
        Ok(settings)
    }

    /// Load from an explicit file (format picked by extension), then the
    /// environment, over the defaults.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            bail!("config file {} does not exist", path.display());
        }
        let figment = Figment::from(Serialized::defaults(Settings::default()));
        let figment = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => figment.merge(Yaml::file(path)),
            Some("json") => figment.merge(Json::file(path)),
            _ => figment.merge(Toml::file(path)),
        };
        let settings = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("failed to load settings from {}", path.display()))?;
        Ok(settings)
    }

    /// Reject settings the server cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            bail!("unknown log level {:?}", self.log_level);
        }
        if self.server.host.trim().is_empty() {
            bail!("server.host must not be empty");
        }
        let cookie = &self.session.cookie_name;
        if cookie.is_empty()
            || cookie
                .chars()
                .any(|c| c.is_whitespace() || c.is_control() || matches!(c, ';' | '=' | ','))
        {
            bail!("session.cookie_name {cookie:?} is not a valid cookie name");
        }
        if self.session.refresh_interval_ms == 0 {
            bail!("session.refresh_interval_ms must be positive");
        }
        if self.session.max_age_secs == 0 {
            bail!("session.max_age_secs must be positive");
        }
        if self.session.cleanup_interval_secs == 0 {
            bail!("session.cleanup_interval_secs must be positive");
        }
        if let Some(bad) = self.auth.ignore_paths.iter().find(|p| !p.starts_with('/')) {
            bail!("auth.ignore_paths entry {bad:?} must start with '/'");
        }
        if self.password.min_length < 6 {
            bail!("password.min_length must be at least 6");
        }
        if !(1..=20).contains(&self.password.scrypt_log_n) {
            bail!("password.scrypt_log_n must be between 1 and 20");
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.server.host, self.server.port))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.session.refresh_interval_ms)
    }

    pub fn session_max_age(&self) -> Duration {
        Duration::from_secs(self.session.max_age_secs)
    }

    pub fn gate_config(&self) -> GateConfig {
        GateConfig {
            exemptions: self.auth.ignore_paths.iter().cloned().collect::<ExemptionSet>(),
            refresh_interval: self.refresh_interval(),
            max_age: self.session_max_age(),
        }
    }

    pub fn password_requirements(&self) -> PasswordRequirements {
        PasswordRequirements {
            min_length: self.password.min_length,
            require_letter: self.password.require_letter,
            require_uppercase: self.password.require_uppercase,
            require_lowercase: self.password.require_lowercase,
            require_digit: self.password.require_digit,
            require_special: self.password.require_special,
        }
    }
}
