//! Configuration shared by the server and the CLI.
//!
//! Values come from a TOML file, then from environment variables, then from
//! command-line flags applied by the binaries.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use twtodo_core::ListId;
use twtodo_mstodo::DEFAULT_BASE_URL;
use twtodo_taskwarrior::TaskwarriorCli;

/// Environment variable overriding `[remote] access_token`.
pub const ENV_ACCESS_TOKEN: &str = "TWTODO_ACCESS_TOKEN";

/// Environment variable overriding `[sync] list_id`.
pub const ENV_LIST_ID: &str = "TWTODO_LIST_ID";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Missing setting: {0}")]
    Missing(&'static str),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub remote: RemoteConfig,
    pub taskwarrior: TaskwarriorConfig,
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the sync server listens on.
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:41001".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Microsoft Graph API root.
    pub base_url: String,

    /// Bearer token for Graph.
    pub access_token: Option<String>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskwarriorConfig {
    /// `task` executable name or path.
    pub binary: String,

    /// Alternative taskrc (sets `TASKRC`).
    pub taskrc: Option<PathBuf>,

    /// Alternative data directory (sets `TASKDATA`).
    pub data_dir: Option<PathBuf>,
}

impl Default for TaskwarriorConfig {
    fn default() -> Self {
        Self {
            binary: "task".to_string(),
            taskrc: None,
            data_dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// To-Do list pulled when no list is given on the command line.
    pub list_id: Option<String>,
}

impl Config {
    /// `$XDG_CONFIG_HOME/twtodo/config.toml` or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("twtodo").join("config.toml"))
    }

    /// Load configuration and apply environment overrides.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// used if present, otherwise built-in defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(default) if default.exists() => Self::from_file(&default)?,
                _ => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded config file");
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Override file values with non-empty environment values.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let set = |name: &str| lookup(name).filter(|v: &String| !v.trim().is_empty());

        if let Some(token) = set(ENV_ACCESS_TOKEN) {
            self.remote.access_token = Some(token);
        }
        if let Some(list_id) = set(ENV_LIST_ID) {
            self.sync.list_id = Some(list_id);
        }
    }

    pub fn access_token(&self) -> Result<&str, ConfigError> {
        self.remote
            .access_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::Missing(
                "access token (set [remote] access_token or TWTODO_ACCESS_TOKEN)",
            ))
    }

    /// The list to pull: `flag` if given, else the configured one.
    pub fn list_id(&self, flag: Option<&str>) -> Result<ListId, ConfigError> {
        flag.or(self.sync.list_id.as_deref())
            .map(ListId::new)
            .filter(|id| !id.is_blank())
            .ok_or(ConfigError::Missing(
                "To-Do list id (pass --list, set [sync] list_id or TWTODO_LIST_ID)",
            ))
    }

    /// Taskwarrior adapter for the configured binary and data location.
    pub fn local_store(&self) -> TaskwarriorCli {
        let mut cli = TaskwarriorCli::new(self.taskwarrior.binary.clone());
        if let Some(taskrc) = &self.taskwarrior.taskrc {
            cli = cli.with_taskrc(taskrc.clone());
        }
        if let Some(data_dir) = &self.taskwarrior.data_dir {
            cli = cli.with_data_dir(data_dir.clone());
        }
        cli
    }
}
