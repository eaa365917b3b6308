use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const DEFAULT_PUBLISHER: &str = "anonymous";
pub const DEFAULT_SERVER: &str = "http://127.0.0.1:8080";
pub const CONFIG_FILE_NAME: &str = ".hashref";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "HASHREF_PUBLISHER", default = "default_publisher")]
    pub publisher: String,
    #[serde(rename = "HASHREF_DEFAULT_META", default)]
    pub default_meta: BTreeMap<String, String>,
    #[serde(rename = "HASHREF_SERVER", default = "default_server")]
    pub server_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            publisher: default_publisher(),
            default_meta: BTreeMap::new(),
            server_url: default_server(),
        }
    }
}

fn default_publisher() -> String {
    DEFAULT_PUBLISHER.to_string()
}

fn default_server() -> String {
    DEFAULT_SERVER.to_string()
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("cannot resolve home directory for default config location")]
    HomeDir,
    #[error("cannot read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

type Setter = fn(&mut Config, &str) -> anyhow::Result<()>;

/// Environment variables that override config file values, one setter each.
pub const ENV_OVERRIDES: &[(&str, Setter)] = &[
    ("HASHREF_PUBLISHER", set_publisher),
    ("HASHREF_DEFAULT_META", set_default_meta),
    ("HASHREF_SERVER", set_server),
];

fn set_publisher(cfg: &mut Config, value: &str) -> anyhow::Result<()> {
    cfg.publisher = value.to_string();
    Ok(())
}

fn set_default_meta(cfg: &mut Config, value: &str) -> anyhow::Result<()> {
    cfg.default_meta = serde_json::from_str(value)?;
    Ok(())
}

fn set_server(cfg: &mut Config, value: &str) -> anyhow::Result<()> {
    cfg.server_url = value.to_string();
    Ok(())
}

impl Config {
    /// Apply overrides from the process environment.
    pub fn load_env_values(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        debug!("check env for configuration");
        for &(key, setter) in ENV_OVERRIDES {
            let Some(value) = lookup(key).filter(|v| !v.is_empty()) else {
                continue;
            };
            info!("found {} in env", key);
            if let Err(e) = setter(self, &value) {
                warn!("ignoring {}: {}", key, e);
            }
        }
    }
}

pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    home_dir()
        .map(|h| h.join(CONFIG_FILE_NAME))
        .ok_or(ConfigError::HomeDir)
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Load the config file, falling back to defaults when it is missing or
/// malformed. Only an unresolvable default location is fatal.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    match read_config(&path) {
        Ok(cfg) => {
            info!("loaded config {}", path.display());
            Ok(cfg)
        }
        Err(e) => {
            warn!("{}; using default config", e);
            Ok(Config::default())
        }
    }
}
