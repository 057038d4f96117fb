//! Configuration file loading with precedence handling.

use crate::model::BandSize;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A band size from some configuration layer is not a positive integer.
    #[error("Invalid band size from {origin}: {value}")]
    InvalidBandSize {
        /// Which layer supplied it (config file, env var, CLI).
        origin: &'static str,
        /// The rejected raw value.
        value: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/varscope/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Items per band when segmenting large collections.
    #[serde(default)]
    pub band_size: Option<i64>,

    /// Expand the Globals section on startup.
    #[serde(default)]
    pub show_globals: Option<bool>,

    /// Show underscore-prefixed attributes and globals.
    #[serde(default)]
    pub show_hidden: Option<bool>,

    /// Levels expanded by `--print` and `--json`.
    #[serde(default)]
    pub print_depth: Option<usize>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Items per band.
    pub band_size: BandSize,
    /// Globals section expanded on startup.
    pub show_globals: bool,
    /// Underscore-prefixed names displayed.
    pub show_hidden: bool,
    /// Levels expanded by non-interactive output.
    pub print_depth: usize,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            band_size: BandSize::DEFAULT,
            show_globals: false,
            show_hidden: false,
            print_depth: 2,
            log_file_path: default_log_path(),
        }
    }
}

/// CLI overrides, `None` for flags the user did not pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--band-size`
    pub band_size: Option<usize>,
    /// `--globals`
    pub show_globals: Option<bool>,
    /// `--show-hidden`
    pub show_hidden: Option<bool>,
    /// `--depth`
    pub print_depth: Option<usize>,
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/varscope/varscope.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("varscope").join("varscope.log")
    } else {
        PathBuf::from("varscope.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/varscope/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("varscope").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `VARSCOPE_CONFIG` environment variable
/// 3. Default path `~/.config/varscope/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("VARSCOPE_CONFIG") {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(
                "VARSCOPE_CONFIG is set but empty".to_string(),
            ));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
///
/// # Errors
///
/// Returns `ConfigError::InvalidBandSize` if the file sets a non-positive band size.
pub fn merge_config(config_file: Option<ConfigFile>) -> Result<ResolvedConfig, ConfigError> {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return Ok(defaults);
    };

    let band_size = match config.band_size {
        Some(raw) => BandSize::try_from(raw).map_err(|_| ConfigError::InvalidBandSize {
            origin: "config file",
            value: raw.to_string(),
        })?,
        None => defaults.band_size,
    };

    Ok(ResolvedConfig {
        band_size,
        show_globals: config.show_globals.unwrap_or(defaults.show_globals),
        show_hidden: config.show_hidden.unwrap_or(defaults.show_hidden),
        print_depth: config.print_depth.unwrap_or(defaults.print_depth),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    })
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `VARSCOPE_BAND_SIZE`: Override band size
///
/// # Errors
///
/// Returns `ConfigError::InvalidBandSize` if the variable is set to anything but a
/// positive integer.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(raw) = std::env::var("VARSCOPE_BAND_SIZE") {
        config.band_size = parse_band_size(&raw, "VARSCOPE_BAND_SIZE")?;
    }
    Ok(config)
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
///
/// # Errors
///
/// Returns `ConfigError::InvalidBandSize` for `--band-size 0`.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    overrides: CliOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    if let Some(raw) = overrides.band_size {
        config.band_size = BandSize::new(raw).map_err(|_| ConfigError::InvalidBandSize {
            origin: "--band-size",
            value: raw.to_string(),
        })?;
    }

    if let Some(show_globals) = overrides.show_globals {
        config.show_globals = show_globals;
    }

    if let Some(show_hidden) = overrides.show_hidden {
        config.show_hidden = show_hidden;
    }

    if let Some(depth) = overrides.print_depth {
        config.print_depth = depth;
    }

    Ok(config)
}

fn parse_band_size(raw: &str, origin: &'static str) -> Result<BandSize, ConfigError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|n| BandSize::try_from(n).ok())
        .ok_or_else(|| {
            warn!(origin, value = raw, "rejected band size");
            ConfigError::InvalidBandSize {
                origin,
                value: raw.to_string(),
            }
        })
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
