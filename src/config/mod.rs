//! Configuration module.

pub mod loader;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, CliOverrides, ConfigError,
    ConfigFile, ResolvedConfig,
};

use crate::state::{PageResetPolicy, PageSize, SelectionMode};

/// Message shown by the rendering layer when there are no rows.
pub const DEFAULT_EMPTY_MESSAGE: &str = "No data available";

/// Per-table configuration.
///
/// Fixed for the lifetime of a table, except `loading` which the caller
/// flips with [`TableState::set_loading`](crate::state::TableState::set_loading).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    /// Whether rows can be selected at all.
    pub selectable: bool,

    /// Single or multiple selection.
    pub selection_mode: SelectionMode,

    /// Rows per page.
    pub page_size: PageSize,

    /// Whether the table starts in the loading state.
    pub loading: bool,

    /// Text for the empty state.
    pub empty_message: String,

    /// Page behavior when the row count changes.
    pub page_reset: PageResetPolicy,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            selectable: true,
            selection_mode: SelectionMode::Multiple,
            page_size: PageSize::default(),
            loading: false,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            page_reset: PageResetPolicy::ResetToFirst,
        }
    }
}

impl TableConfig {
    /// Set rows per page.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the selection mode.
    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    /// Enable or disable selection.
    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Set the page reset policy.
    pub fn with_page_reset(mut self, policy: PageResetPolicy) -> Self {
        self.page_reset = policy;
        self
    }

    /// Set the empty-state text.
    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_documented_defaults() {
        let config = TableConfig::default();
        assert!(config.selectable);
        assert_eq!(config.selection_mode, SelectionMode::Multiple);
        assert_eq!(config.page_size.get(), 10);
        assert!(!config.loading);
        assert_eq!(config.empty_message, "No data available");
        assert_eq!(config.page_reset, PageResetPolicy::ResetToFirst);
    }

    #[test]
    fn builders_override_fields() {
        let config = TableConfig::default()
            .with_page_size(PageSize::new(3).unwrap())
            .with_selection_mode(SelectionMode::Single)
            .with_selectable(false)
            .with_page_reset(PageResetPolicy::Clamp)
            .with_empty_message("Nothing here");
        assert_eq!(config.page_size.get(), 3);
        assert_eq!(config.selection_mode, SelectionMode::Single);
        assert!(!config.selectable);
        assert_eq!(config.page_reset, PageResetPolicy::Clamp);
        assert_eq!(config.empty_message, "Nothing here");
    }
}
