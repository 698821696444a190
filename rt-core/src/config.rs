//! Client configuration.
//!
//! Holds the API host and scheme, optional credentials used to authorize at
//! startup, gateway headers, and logging preferences. Configuration is
//! persisted as TOML; every key is optional and falls back to a default.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{RtError, RtResult};

/// Top-level client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API connection settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Credentials used to authorize when the client is created.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// API host without scheme (e.g. "rutube.ru").
    #[serde(default = "default_host")]
    pub host: String,

    /// Use https when true, http otherwise.
    #[serde(default = "default_true")]
    pub secure: bool,

    /// Request timeout in milliseconds, enforced by the gateway.
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,

    /// User agent override.
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Value for the X-Real-IP header.
    #[serde(default)]
    pub real_ip: Option<String>,

    /// Extra headers sent with every request.
    #[serde(default)]
    pub custom_headers: HashMap<String, String>,
}

/// Credentials for token authorization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files. Empty means console only.
    #[serde(default)]
    pub directory: String,

    /// Use JSON format for file output.
    #[serde(default)]
    pub json_output: bool,
}

fn default_host() -> String {
    constants::DEFAULT_HOST.to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout() -> u64 {
    constants::DEFAULT_TIMEOUT_MS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            secure: true,
            timeout_ms: default_timeout(),
            user_agent: None,
            real_ip: None,
            custom_headers: HashMap::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: String::new(),
            json_output: false,
        }
    }
}

impl ServerConfig {
    /// URL scheme implied by the `secure` flag.
    pub fn scheme(&self) -> &'static str {
        if self.secure {
            "https"
        } else {
            "http"
        }
    }

    /// Absolute base URL with a trailing slash, e.g. `https://rutube.ru/`.
    pub fn base_url(&self) -> String {
        format!(
            "{}://{}/",
            self.scheme(),
            ClientConfig::sanitize_host(&self.host)
        )
    }
}

impl AuthConfig {
    /// Username and password, when both are configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(user), Some(pass)) if !user.is_empty() => Some((user, pass)),
            _ => None,
        }
    }
}

impl ClientConfig {
    /// Configuration for a host with all other settings defaulted.
    pub fn for_host(host: &str, secure: bool) -> Self {
        let mut config = Self::default();
        config.server.host = Self::sanitize_host(host);
        config.server.secure = secure;
        config
    }

    /// Load configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> RtResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load from `path` when it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> RtResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file, creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> RtResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| RtError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// The configured log directory, if file logging is enabled.
    pub fn log_dir(&self) -> Option<PathBuf> {
        if self.logging.directory.is_empty() {
            None
        } else {
            Some(PathBuf::from(&self.logging.directory))
        }
    }

    /// Reduce a user-supplied host to a bare host name.
    ///
    /// Strips surrounding whitespace and quotes, any scheme, and trailing
    /// slashes.
    pub fn sanitize_host(host: &str) -> String {
        let trimmed = host.trim().trim_matches('"').trim();
        let without_scheme = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .unwrap_or(trimmed);
        without_scheme.trim_end_matches('/').to_string()
    }

    /// Platform configuration file: `<config dir>/rutube/config.toml`.
    pub fn default_path() -> RtResult<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| RtError::Config("could not determine config directory".into()))?;
        Ok(base.join(constants::APP_DIR).join(constants::CONFIG_FILE_NAME))
    }

    /// Platform log directory: `<data dir>/rutube/logs`.
    pub fn default_log_dir() -> RtResult<PathBuf> {
        let base = dirs::data_dir()
            .ok_or_else(|| RtError::Config("could not determine data directory".into()))?;
        Ok(base.join(constants::APP_DIR).join("logs"))
    }
}
