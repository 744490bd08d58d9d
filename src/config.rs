//! Configuration module
//!
//! The service reads a single TOML file; every section and key is optional
//! and falls back to the defaults below.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8000
//! shutdown_timeout = 30
//!
//! [database]
//! url = "sqlite://./courses.db?mode=rwc"
//!
//! [logging]
//! level = "info"
//! format = "pretty"   # or "json"
//!
//! [session]
//! ttl_seconds = 1209600
//! secure_cookie = false
//!
//! [admin]
//! enabled = true
//! username = "admin"
//! email = "admin@example.com"
//! password = "admin"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::DatabaseConfig;
use crate::interfaces::http::router::SessionSettings;

/// Directory name under the platform config dir
pub const APP_DIR: &str = "course-enrollment";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub logging: LoggingConfig,
    pub session: SessionConfig,
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        let db = DatabaseConfig::default();
        Self {
            url: db.url,
            max_connections: db.max_connections,
        }
    }
}

impl From<&DatabaseSection> for DatabaseConfig {
    fn from(section: &DatabaseSection) -> Self {
        DatabaseConfig {
            url: section.url.clone(),
            max_connections: section.max_connections,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` wins when set
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub ttl_seconds: i64,
    /// Mark the session cookie `Secure` (HTTPS deployments)
    pub secure_cookie: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: 14 * 24 * 60 * 60,
            secure_cookie: false,
        }
    }
}

impl From<&SessionConfig> for SessionSettings {
    fn from(section: &SessionConfig) -> Self {
        SessionSettings {
            ttl: chrono::Duration::seconds(section.ttl_seconds),
            secure_cookie: section.secure_cookie,
        }
    }
}

/// Staff account created on first start when no users exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub enabled: bool,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            username: "admin".to_string(),
            email: "admin@example.com".to_string(),
            password: "admin".to_string(),
        }
    }
}

impl AppConfig {
    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path`, or fall back to defaults and hand the error back for
    /// logging. With `strict` set the error is returned instead; `--check`
    /// must judge the file it was given, not the defaults.
    pub fn load_or_default(
        path: &Path,
        strict: bool,
    ) -> Result<(Self, Option<ConfigError>), ConfigError> {
        match Self::load(path) {
            Ok(cfg) => Ok((cfg, None)),
            Err(e) if strict => Err(e),
            Err(e) => Ok((Self::default(), Some(e))),
        }
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Catch values that parse but cannot work. Port 0 asks the OS for a
    /// free port.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Invalid("server.host is empty".into()));
        }
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid("database.url is empty".into()));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be at least 1".into(),
            ));
        }
        if self.session.ttl_seconds <= 0 {
            return Err(ConfigError::Invalid(
                "session.ttl_seconds must be positive".into(),
            ));
        }
        if !matches!(self.logging.format.to_lowercase().as_str(), "pretty" | "json") {
            return Err(ConfigError::Invalid(format!(
                "logging.format must be \"pretty\" or \"json\", got \"{}\"",
                self.logging.format
            )));
        }
        if self.admin.enabled && (self.admin.username.is_empty() || self.admin.password.is_empty())
        {
            return Err(ConfigError::Invalid(
                "admin.username and admin.password are required when admin.enabled".into(),
            ));
        }
        Ok(())
    }
}

/// `<config_dir>/course-enrollment/config.toml`, or `./config.toml` when the
/// platform has no config dir.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.logging.format, "pretty");
        assert_eq!(cfg.session.ttl_seconds, 1_209_600);
        assert!(cfg.admin.enabled);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [server]
            port = 9001

            [session]
            secure_cookie = true
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9001);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert!(cfg.session.secure_cookie);
        assert_eq!(cfg.session.ttl_seconds, 1_209_600);
    }

    #[test]
    fn rejects_unusable_values() {
        let mut cfg = AppConfig::default();
        cfg.session.ttl_seconds = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.logging.format = "xml".into();
        assert!(cfg.validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.admin.password.clear();
        assert!(cfg.validate().is_err());
        cfg.admin.enabled = false;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = AppConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "course-enrollment-{}-{}.toml",
            std::process::id(),
            name
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn strict_load_reports_malformed_file() {
        let path = write_temp("malformed", "[server]\nport = \"not-a-number\"\n");

        let err = AppConfig::load_or_default(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));

        let (cfg, err) = AppConfig::load_or_default(&path, false).unwrap();
        assert_eq!(cfg.server.port, 8000);
        assert!(matches!(err, Some(ConfigError::Parse { .. })));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn strict_load_reports_missing_file() {
        let path = Path::new("/definitely/not/here.toml");
        assert!(matches!(
            AppConfig::load_or_default(path, true),
            Err(ConfigError::Io { .. })
        ));
        let (_, err) = AppConfig::load_or_default(path, false).unwrap();
        assert!(matches!(err, Some(ConfigError::Io { .. })));
    }

    #[test]
    fn readable_file_loads_without_error() {
        let path = write_temp("valid", "[server]\nport = 9100\n");
        let (cfg, err) = AppConfig::load_or_default(&path, true).unwrap();
        assert_eq!(cfg.server.port, 9100);
        assert!(err.is_none());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn port_zero_is_ephemeral_and_valid() {
        let mut cfg = AppConfig::default();
        cfg.server.port = 0;
        assert!(cfg.validate().is_ok());
        cfg.server.host = " ".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn default_path_ends_with_app_dir() {
        let path = default_config_path();
        assert!(path.ends_with(Path::new(APP_DIR).join("config.toml")) || path.ends_with("config.toml"));
    }
}
