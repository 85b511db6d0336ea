//! CLI for the AMR asset mirror.

mod commands;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use amr_core::config;
use amr_core::settings::{MirrorSettings, SettingsInput};
use std::path::PathBuf;

use commands::run_mirror;

/// Exit status for configuration errors and aborted runs.
pub const EXIT_FAILURE_CODE: i32 = 255;

pub const USAGE: &str = "Usage: amr --source=<source-folder-path> --output=<destination-folder-path> \
[--types=jpg,png,svg,mp4,jpeg,webm] [--concurrency=4] [--protect=<host>]... [--config=<file>]";

/// Mirror media assets referenced in a tree of text files.
#[derive(Debug, Parser)]
#[command(name = "amr", version)]
#[command(about = "AMR: mirror media assets referenced in a source tree", long_about = None)]
pub struct Cli {
    /// Root directory to scan for URLs.
    #[arg(short = 's', long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Root directory mirrored files are written under (<output>/<host>/<path>).
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Comma-separated file extensions to mirror [default: jpg,png,svg,mp4,jpeg,webm].
    #[arg(short = 't', long, value_name = "LIST")]
    pub types: Option<String>,

    /// Number of concurrent fetches [default: 4].
    #[arg(short = 'c', long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Host whose failures abort the run (subdomains included). Repeatable; added to the config list.
    #[arg(long = "protect", value_name = "HOST")]
    pub protect: Vec<String>,

    /// Config file to use instead of ~/.config/amr/config.toml.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// How the process ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// Every URL processed.
    Done,
    /// Bad or missing options; nothing was scanned.
    ConfigError,
    /// A protected host failed.
    Aborted,
}

impl Exit {
    pub fn code(self) -> i32 {
        match self {
            Exit::Done => 0,
            Exit::ConfigError | Exit::Aborted => EXIT_FAILURE_CODE,
        }
    }
}

fn usage_error(message: &str) -> Exit {
    eprintln!("amr: {}", message);
    eprintln!("{}", USAGE);
    Exit::ConfigError
}

impl Cli {
    /// Parse arguments; on any parse error print usage and exit 255
    /// (`--help` and `--version` exit 0 as usual).
    pub fn parse_or_exit() -> Self {
        match Cli::try_parse() {
            Ok(cli) => cli,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                e.exit()
            }
            Err(e) => {
                eprint!("{}", e);
                eprintln!("{}", USAGE);
                std::process::exit(EXIT_FAILURE_CODE);
            }
        }
    }

    fn settings_input(&self) -> SettingsInput {
        SettingsInput {
            source: self.source.clone(),
            output: self.output.clone(),
            types: self.types.clone(),
            concurrency: self.concurrency,
            protect: self.protect.clone(),
        }
    }

    pub async fn run(self) -> Result<Exit> {
        let loaded = match &self.config {
            Some(path) => config::load_from_path(path),
            None => config::load_or_default(),
        };
        let cfg = match loaded {
            Ok(cfg) => cfg,
            Err(e) => return Ok(usage_error(&format!("{:#}", e))),
        };
        tracing::debug!("loaded config: {:?}", cfg);

        let settings = match MirrorSettings::resolve(self.settings_input(), &cfg) {
            Ok(s) => s,
            Err(e) => return Ok(usage_error(&e.to_string())),
        };

        run_mirror(&settings).await
    }
}

#[cfg(test)]
mod tests;
