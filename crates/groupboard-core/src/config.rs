//! Configuration loading
//!
//! Sources, lowest to highest precedence: built-in defaults, the TOML file
//! (`<config_dir>/groupboard/config.toml` or `GROUPBOARD_CONFIG`), then
//! `GROUPBOARD_SERVER_URL`, then the `--server-url` flag. Validation runs
//! once, after every override.

use crate::error::ConfigError;
use crate::models::{GroupId, ThemePreference};
use crate::source::HttpSourceConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub const CONFIG_ENV: &str = "GROUPBOARD_CONFIG";
pub const SERVER_URL_ENV: &str = "GROUPBOARD_SERVER_URL";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Analytics API root
    #[serde(default = "default_server_url")]
    pub server_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Response reuse window across panels; 0 refetches every time
    #[serde(default)]
    pub cache_ttl_secs: u64,

    /// Groups the TUI can cycle through
    #[serde(default)]
    pub groups: Vec<GroupId>,

    /// Group shown at startup (falls back to the first of `groups`)
    #[serde(default)]
    pub default_group: Option<GroupId>,

    /// Fixed theme; unset means detect
    #[serde(default)]
    pub theme: Option<ThemePreference>,
}

fn default_server_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            request_timeout_secs: default_request_timeout(),
            cache_ttl_secs: 0,
            groups: Vec::new(),
            default_group: None,
            theme: None,
        }
    }
}

impl Config {
    /// `<config_dir>/groupboard/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("groupboard").join("config.toml"))
    }

    /// Load from an explicit path, `GROUPBOARD_CONFIG`, or the default path,
    /// then apply the environment and `server_url` flag overrides.
    ///
    /// A missing default file yields defaults; a missing explicit file is an error.
    pub fn load(explicit: Option<&Path>, server_url: Option<String>) -> Result<Self, ConfigError> {
        let env_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let mut config = match explicit.map(Path::to_path_buf).or(env_path) {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.override_server_url(std::env::var(SERVER_URL_ENV).ok(), server_url);
        config.validate()?;
        Ok(config)
    }

    /// Flag beats env beats file
    fn override_server_url(&mut self, env: Option<String>, flag: Option<String>) {
        if let Some(url) = flag.or(env) {
            self.server_url = url;
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded config file");
        Self::from_toml(&content, path)
    }

    fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                message: format!(
                    "server_url must start with http:// or https:// (got '{}')",
                    self.server_url
                ),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                message: "request_timeout_secs must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Group to show first
    pub fn initial_group(&self) -> Option<GroupId> {
        self.default_group
            .clone()
            .or_else(|| self.groups.first().cloned())
    }

    pub fn http_source_config(&self) -> HttpSourceConfig {
        HttpSourceConfig {
            base_url: self.server_url.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            cache_ttl: Duration::from_secs(self.cache_ttl_secs),
            ..Default::default()
        }
    }
}
