//! Resolution of command-line input and config file into validated run settings.
//!
//! Precedence: CLI flag, then config file, then built-in default. Protected
//! hosts are the union of both sources.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::AmrConfig;
use crate::extract::parse_types;
use crate::fetch::HttpOptions;
use crate::policy::ProtectedHosts;

/// Invalid or missing run configuration. Always detected before any scanning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing required option --source")]
    MissingSource,
    #[error("missing required option --output")]
    MissingOutput,
    #[error("no file types to mirror (--types is empty)")]
    EmptyTypes,
    #[error("--concurrency must be at least 1")]
    ZeroConcurrency,
}

/// Raw, unvalidated options as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct SettingsInput {
    pub source: Option<PathBuf>,
    pub output: Option<PathBuf>,
    /// Comma-separated extension list.
    pub types: Option<String>,
    pub concurrency: Option<usize>,
    /// Extra protected host patterns.
    pub protect: Vec<String>,
}

/// Everything a mirror run needs.
#[derive(Debug, Clone)]
pub struct MirrorSettings {
    pub source: PathBuf,
    pub output: PathBuf,
    pub types: Vec<String>,
    pub concurrency: usize,
    pub protected: ProtectedHosts,
    pub http: HttpOptions,
}

impl MirrorSettings {
    pub fn resolve(input: SettingsInput, cfg: &AmrConfig) -> Result<Self, ConfigError> {
        let source = input.source.ok_or(ConfigError::MissingSource)?;
        let output = input.output.ok_or(ConfigError::MissingOutput)?;

        let types = match input.types.as_deref() {
            Some(raw) => parse_types(raw),
            None => cfg.types.iter().flat_map(|t| parse_types(t)).collect(),
        };
        if types.is_empty() {
            return Err(ConfigError::EmptyTypes);
        }

        let concurrency = input.concurrency.unwrap_or(cfg.concurrency);
        if concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }

        let protected = ProtectedHosts::new(cfg.protected_hosts.iter().chain(input.protect.iter()));

        Ok(Self {
            source,
            output,
            types,
            concurrency,
            protected,
            http: HttpOptions::from(&cfg.http),
        })
    }
}
