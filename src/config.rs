//! Editor configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path::PathBuf;

use crate::export::DEFAULT_EXPORT_NAME;
use crate::theme::{Theme, ThemeError, ThemeMode};

pub const THEME_VAR: &str = "BREADBOARD_THEME";
pub const THEME_FILE_VAR: &str = "BREADBOARD_THEME_FILE";
pub const EXPORT_NAME_VAR: &str = "BREADBOARD_EXPORT_NAME";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid BREADBOARD_THEME: {0}")]
    Mode(ThemeError),
    #[error("failed to read theme file {}: {source}", .path.display())]
    ThemeFile { path: PathBuf, source: std::io::Error },
    #[error("invalid theme file {}: {source}", .path.display())]
    Theme { path: PathBuf, source: ThemeError },
    #[error("BREADBOARD_EXPORT_NAME must not be empty")]
    EmptyExportName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    pub theme: Theme,
    pub export_name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self { theme: Theme::default(), export_name: DEFAULT_EXPORT_NAME.to_owned() }
    }
}

impl EditorConfig {
    /// Build typed editor config from environment variables.
    ///
    /// Optional:
    /// - `BREADBOARD_THEME`: `light` (default) or `dark`
    /// - `BREADBOARD_THEME_FILE`: JSON theme; its `mode` wins over `BREADBOARD_THEME`
    /// - `BREADBOARD_EXPORT_NAME`: default `breadboard.md`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for unknown modes, unreadable or malformed
    /// theme files, and an empty export name.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Unset (or non-UTF-8) variables fall back to their defaults.
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`EditorConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mode = match lookup(THEME_VAR) {
            Some(raw) => raw.parse::<ThemeMode>().map_err(ConfigError::Mode)?,
            None => ThemeMode::default(),
        };

        let theme = match lookup(THEME_FILE_VAR) {
            Some(path) => load_theme_file(PathBuf::from(path), mode)?,
            None => Theme::with_mode(mode),
        };

        let export_name = lookup(EXPORT_NAME_VAR).unwrap_or_else(|| DEFAULT_EXPORT_NAME.to_owned());
        if export_name.trim().is_empty() {
            return Err(ConfigError::EmptyExportName);
        }

        tracing::debug!(mode = %theme.mode, colors = theme.edge_palette.len(), %export_name, "editor config loaded");

        Ok(Self { theme, export_name })
    }
}

/// Read a JSON theme from `path`, using `mode` when the file omits one.
///
/// # Errors
///
/// Returns [`ConfigError::ThemeFile`] if the file cannot be read and
/// [`ConfigError::Theme`] if it does not hold a valid theme.
pub fn load_theme_file(path: PathBuf, mode: ThemeMode) -> Result<Theme, ConfigError> {
    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(source) => return Err(ConfigError::ThemeFile { path, source }),
    };
    Theme::from_json_with_mode(&raw, mode).map_err(|source| ConfigError::Theme { path, source })
}
