//! Config file loading and settings resolution
//!
//! Values come from, in order of precedence: command line flags, the config
//! file, then the facade's own defaults.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use kubepeek_k8s::{ConfigSource, LocalConfig};
use serde::Deserialize;

use crate::cli::{Args, Command};

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "KUBEPEEK_CONFIG";

/// Contents of `config.toml`
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub namespace: Option<String>,
    pub tail_lines: Option<i64>,
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
    pub json: Option<bool>,
}

impl FileConfig {
    /// Load the config file named on the command line, by `$KUBEPEEK_CONFIG`,
    /// or found in the user config dir
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match locate(explicit, std::env::var_os(CONFIG_ENV)) {
            Some((path, true)) => Self::read(&path),
            Some((path, false)) if path.exists() => Self::read(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Returns the config path and whether it must exist
fn locate(explicit: Option<&Path>, env: Option<OsString>) -> Option<(PathBuf, bool)> {
    if let Some(path) = explicit {
        return Some((path.to_path_buf(), true));
    }
    if let Some(path) = env.filter(|p| !p.is_empty()) {
        return Some((PathBuf::from(path), true));
    }
    dirs::config_dir().map(|dir| (dir.join("kubepeek").join("config.toml"), false))
}

/// Effective settings for one run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub local: LocalConfig,
    pub namespace: Option<String>,
    pub tail_lines: Option<i64>,
    pub json: bool,
}

impl Settings {
    pub fn resolve(args: &Args, file: FileConfig) -> Self {
        let command = args.command();
        let tail_lines = match &command {
            Command::Logs { tail, .. } => tail.or(file.tail_lines),
            _ => file.tail_lines,
        };

        Self {
            local: LocalConfig {
                kubeconfig: args.kubeconfig.clone().or(file.kubeconfig),
                context: args.context.clone().or(file.context),
            },
            namespace: command.namespace().map(str::to_string).or(file.namespace),
            tail_lines,
            json: args.json || file.json.unwrap_or(false),
        }
    }

    /// A named kubeconfig or context pins the local source; otherwise detect
    pub fn config_source(&self) -> ConfigSource {
        if self.local.is_explicit() {
            ConfigSource::Local(self.local.clone())
        } else {
            ConfigSource::detect(self.local.clone())
        }
    }
}
