//! Configuration file loading with precedence handling.
//!
//! Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest).

use crate::config::{TableConfig, DEFAULT_EMPTY_MESSAGE};
use crate::model::ColumnSpec;
use crate::state::{PageResetPolicy, PageSize, SelectionMode};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "GRIDSTATE_CONFIG";

/// Environment variable overriding the page size.
pub const PAGE_SIZE_ENV: &str = "GRIDSTATE_PAGE_SIZE";

/// Environment variable overriding the selection mode.
pub const SELECTION_MODE_ENV: &str = "GRIDSTATE_SELECTION_MODE";

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

    /// A value parsed but is out of range (zero page size, unknown mode in an env var).
    #[error("Invalid configuration: {reason}")]
    Invalid {
        /// What is wrong.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional. Corresponds to `~/.config/gridstate/config.toml`:
///
/// ```toml
/// page_size = 25
/// selection_mode = "single"
/// page_reset = "clamp"
///
/// [[columns]]
/// key = "name"
/// title = "Name"
///
/// [[columns]]
/// key = "city"
/// field = "address.city"
/// sortable = false
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Rows per page.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// `single` or `multiple`.
    #[serde(default)]
    pub selection_mode: Option<SelectionMode>,

    /// Whether rows can be selected.
    #[serde(default)]
    pub selectable: Option<bool>,

    /// Text for the empty state.
    #[serde(default)]
    pub empty_message: Option<String>,

    /// `reset-to-first` or `clamp`.
    #[serde(default)]
    pub page_reset: Option<PageResetPolicy>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Default tracing filter when `RUST_LOG` is unset.
    #[serde(default)]
    pub log_level: Option<String>,

    /// Column schema. Inferred from the first row when absent.
    #[serde(default)]
    pub columns: Option<Vec<ColumnSpec>>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Rows per page (validated by [`ResolvedConfig::table_config`]).
    pub page_size: usize,
    /// Selection mode.
    pub selection_mode: SelectionMode,
    /// Whether rows can be selected.
    pub selectable: bool,
    /// Text for the empty state.
    pub empty_message: String,
    /// Page behavior when the row count changes.
    pub page_reset: PageResetPolicy,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Default tracing filter.
    pub log_level: String,
    /// Column schema, if configured.
    pub columns: Option<Vec<ColumnSpec>>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::DEFAULT,
            selection_mode: SelectionMode::default(),
            selectable: true,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            page_reset: PageResetPolicy::default(),
            log_file_path: default_log_path(),
            log_level: "info".to_string(),
            columns: None,
        }
    }
}

impl ResolvedConfig {
    /// Per-table settings for the engine.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the page size is zero.
    pub fn table_config(&self) -> Result<TableConfig, ConfigError> {
        let page_size = PageSize::new(self.page_size).map_err(|e| ConfigError::Invalid {
            reason: e.to_string(),
        })?;

        Ok(TableConfig::default()
            .with_page_size(page_size)
            .with_selection_mode(self.selection_mode)
            .with_selectable(self.selectable)
            .with_page_reset(self.page_reset)
            .with_empty_message(self.empty_message.clone()))
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/gridstate/gridstate.log` on Linux, or the
/// platform's state directory elsewhere. Falls back to the current directory
/// when no state directory exists (macOS, Windows).
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("gridstate").join("gridstate.log"),
        None => PathBuf::from("gridstate.log"),
    }
}

/// Resolve default config file path.
///
/// Returns `~/.config/gridstate/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gridstate").join("config.toml"))
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist (not an error, use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

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

    info!(path = %path.display(), "Loaded config file");
    Ok(Some(config))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `GRIDSTATE_CONFIG` environment variable
/// 3. Default path `~/.config/gridstate/config.toml`
///
/// Missing config files are NOT errors; defaults are used.
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

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(format!("{CONFIG_ENV} is empty")));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        page_size: config.page_size.unwrap_or(defaults.page_size),
        selection_mode: config.selection_mode.unwrap_or(defaults.selection_mode),
        selectable: config.selectable.unwrap_or(defaults.selectable),
        empty_message: config.empty_message.unwrap_or(defaults.empty_message),
        page_reset: config.page_reset.unwrap_or(defaults.page_reset),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        log_level: config.log_level.unwrap_or(defaults.log_level),
        columns: config.columns.or(defaults.columns),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `GRIDSTATE_PAGE_SIZE`: rows per page
/// - `GRIDSTATE_SELECTION_MODE`: `single` or `multiple`
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] if a variable is set to an unparsable value.
pub fn apply_env_overrides(config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    apply_overrides_from(config, |name| std::env::var(name).ok())
}

fn apply_overrides_from(
    mut config: ResolvedConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig, ConfigError> {
    if let Some(raw) = lookup(PAGE_SIZE_ENV) {
        config.page_size = raw.trim().parse().map_err(|_| ConfigError::Invalid {
            reason: format!("{PAGE_SIZE_ENV} must be a positive integer (got '{raw}')"),
        })?;
    }

    if let Some(raw) = lookup(SELECTION_MODE_ENV) {
        config.selection_mode = match raw.trim().to_ascii_lowercase().as_str() {
            "single" => SelectionMode::Single,
            "multiple" => SelectionMode::Multiple,
            _ => {
                return Err(ConfigError::Invalid {
                    reason: format!(
                        "{SELECTION_MODE_ENV} must be 'single' or 'multiple' (got '{raw}')"
                    ),
                })
            }
        };
    }

    Ok(config)
}

/// Values given explicitly on the command line.
///
/// `None` means "not given"; the lower-precedence value is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--page-size`
    pub page_size: Option<usize>,
    /// `--mode`
    pub selection_mode: Option<SelectionMode>,
    /// `--no-select` (as `Some(false)`)
    pub selectable: Option<bool>,
    /// `--columns`
    pub columns: Option<Vec<ColumnSpec>>,
    /// `--log-file`
    pub log_file_path: Option<PathBuf>,
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
pub fn apply_cli_overrides(mut config: ResolvedConfig, overrides: CliOverrides) -> ResolvedConfig {
    if let Some(page_size) = overrides.page_size {
        config.page_size = page_size;
    }
    if let Some(mode) = overrides.selection_mode {
        config.selection_mode = mode;
    }
    if let Some(selectable) = overrides.selectable {
        config.selectable = selectable;
    }
    if let Some(columns) = overrides.columns {
        config.columns = Some(columns);
    }
    if let Some(path) = overrides.log_file_path {
        config.log_file_path = path;
    }
    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
