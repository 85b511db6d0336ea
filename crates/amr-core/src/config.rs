use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions mirrored when neither the config file nor `--types` says otherwise.
pub const DEFAULT_TYPES: &[&str] = &["jpg", "png", "svg", "mp4", "jpeg", "webm"];

/// Default number of fetches in flight.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Host whose failures abort the whole run unless configured otherwise.
pub const DEFAULT_PROTECTED_HOST: &str = "streamelements.com";

/// HTTP client parameters (optional `[http]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Connect timeout in seconds (None = libcurl default).
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Whole-transfer timeout in seconds (None = no limit).
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Maximum redirects followed per fetch.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,
    /// User-Agent header; None sends `amr/<version>`.
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_max_redirects() -> u32 {
    20
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: None,
            timeout_secs: None,
            max_redirects: default_max_redirects(),
            user_agent: None,
        }
    }
}

/// Global configuration loaded from `~/.config/amr/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmrConfig {
    /// Number of concurrent fetches when `--concurrency` is not given.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// File extensions to mirror when `--types` is not given.
    #[serde(default = "default_types")]
    pub types: Vec<String>,
    /// Hosts (and their subdomains) whose failures abort the run.
    #[serde(default = "default_protected_hosts")]
    pub protected_hosts: Vec<String>,
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

fn default_types() -> Vec<String> {
    DEFAULT_TYPES.iter().map(|t| t.to_string()).collect()
}

fn default_protected_hosts() -> Vec<String> {
    vec![DEFAULT_PROTECTED_HOST.to_string()]
}

impl Default for AmrConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            types: default_types(),
            protected_hosts: default_protected_hosts(),
            http: HttpConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("amr")?;
    Ok(xdg_dirs.get_config_home().join("amr").join("config.toml"))
}

/// Load configuration from `path`, or built-in defaults if the file does not exist.
pub fn load_from_path(path: &Path) -> Result<AmrConfig> {
    if !path.exists() {
        tracing::debug!("no config at {}, using defaults", path.display());
        return Ok(AmrConfig::default());
    }
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: AmrConfig =
        toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}

/// Load configuration from the XDG config dir. The file is never created.
pub fn load_or_default() -> Result<AmrConfig> {
    load_from_path(&config_path()?)
}
