mod api;
mod defaults;
mod validation;

use crate::cli::Args;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub use api::ApiConfig;
pub use defaults::{
    default_log_filter, parse_flag, BASE_URL_ENV, DEFAULT_BASE_URL, EXAMPLE_CONFIG,
    LOG_FILTER_ENV, VERBOSE_ENV,
};
pub use validation::{expand_env_var_in_string, normalize_base_url};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub verbose: Option<bool>,
    #[serde(default)]
    pub filter: Option<String>,
}

/// On-disk configuration (YAML or JSON).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values taken from the command line and the process environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    pub cli_base_url: Option<String>,
    pub cli_verbose: bool,
    pub env_base_url: Option<String>,
    pub env_verbose: Option<String>,
    pub env_log_filter: Option<String>,
}

impl ConfigSources {
    pub fn from_env_and_args(args: &Args) -> Self {
        Self {
            cli_base_url: args.api_url.clone(),
            cli_verbose: args.verbose,
            env_base_url: env::var(BASE_URL_ENV).ok(),
            env_verbose: env::var(VERBOSE_ENV).ok(),
            env_log_filter: env::var(LOG_FILTER_ENV).ok(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub verbose: bool,
    pub log_filter: String,
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> Result<Self, String> {
        let file_config = FileConfig::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring unreadable config file");
            FileConfig::default()
        });
        Self::resolve(&ConfigSources::from_env_and_args(args), &file_config)
    }

    /// Precedence for every setting: CLI > env var > config file > default.
    pub fn resolve(sources: &ConfigSources, file_config: &FileConfig) -> Result<Self, String> {
        let raw_base_url = sources
            .cli_base_url
            .clone()
            .or_else(|| sources.env_base_url.clone())
            .or_else(|| {
                file_config
                    .api
                    .base_url
                    .as_deref()
                    .map(expand_env_var_in_string)
            })
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = normalize_base_url(&raw_base_url)?;

        let verbose = sources.cli_verbose
            || sources
                .env_verbose
                .as_deref()
                .map(parse_flag)
                .or(file_config.logging.verbose)
                .unwrap_or(false);

        let log_filter = sources
            .env_log_filter
            .clone()
            .filter(|f| !f.trim().is_empty())
            .or_else(|| file_config.logging.filter.clone())
            .unwrap_or_else(|| default_log_filter(verbose));

        Ok(Config {
            base_url,
            verbose,
            log_filter,
        })
    }
}

impl FileConfig {
    pub fn load() -> Result<Self> {
        for path in Self::get_config_paths() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        Ok(FileConfig::default())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let is_yaml = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("yaml") | Some("yml")
        );

        let config = if is_yaml {
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config file: {}", path.display()))?
        } else {
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config file: {}", path.display()))?
        };

        Ok(config)
    }

    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".parkctl.yaml"),
            PathBuf::from(".parkctl.yml"),
            PathBuf::from(".parkctl.json"),
        ];

        if let Some(config_dir) = Self::user_config_dir() {
            paths.push(config_dir.join("parkctl.yaml"));
            paths.push(config_dir.join("parkctl.yml"));
            paths.push(config_dir.join("parkctl.json"));
        }

        paths
    }

    pub fn user_config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("parkctl"))
    }

    /// Write the example config to `path` unless a file is already there.
    /// Returns whether a file was written.
    pub fn write_example(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, EXAMPLE_CONFIG)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(true)
    }
}
