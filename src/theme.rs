//! Light/dark mode and the edge color palette.
//!
//! A theme can be built in code or loaded from a JSON document such as
//! `{"mode": "dark", "edgePalette": ["#3b82f6", "#f43f5e"]}`. Colors are
//! normalized to lowercase `#rrggbb` on load.

#[cfg(test)]
#[path = "theme_test.rs"]
mod tests;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Edge colors, cycled by link index.
pub const DEFAULT_EDGE_PALETTE: [&str; 10] = [
    "#3b82f6", // blue-500
    "#a855f7", // purple-500
    "#f59e0b", // amber-500
    "#10b981", // emerald-500
    "#ec4899", // pink-500
    "#06b6d4", // cyan-500
    "#f97316", // orange-500
    "#8b5cf6", // violet-500
    "#14b8a6", // teal-500
    "#f43f5e", // rose-500
];

/// Error returned when loading a theme.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("invalid theme JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid color `{0}` (expected #rgb or #rrggbb)")]
    InvalidColor(String),
    #[error("unknown theme mode `{0}` (expected `light` or `dark`)")]
    UnknownMode(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl FromStr for ThemeMode {
    type Err = ThemeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ThemeError::UnknownMode(other.to_owned())),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Light => "light",
            Self::Dark => "dark",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub mode: ThemeMode,
    pub edge_palette: Vec<String>,
}

/// On-disk shape; every field optional so partial files are accepted.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ThemeDocument {
    mode: Option<ThemeMode>,
    edge_palette: Option<Vec<String>>,
}

impl Default for Theme {
    fn default() -> Self {
        Self::with_mode(ThemeMode::Light)
    }
}

impl Theme {
    /// Default palette in the given mode.
    #[must_use]
    pub fn with_mode(mode: ThemeMode) -> Self {
        Self { mode, edge_palette: DEFAULT_EDGE_PALETTE.iter().map(|c| (*c).to_owned()).collect() }
    }

    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.mode == ThemeMode::Dark
    }

    /// Load a theme from JSON, defaulting to light mode when the document
    /// omits `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError`] for malformed JSON or colors that are not hex.
    pub fn from_json(raw: &str) -> Result<Self, ThemeError> {
        Self::from_json_with_mode(raw, ThemeMode::Light)
    }

    /// Load a theme from JSON, using `fallback_mode` when the document omits
    /// `mode`. An omitted palette means the default palette.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError`] for malformed JSON or colors that are not hex.
    pub fn from_json_with_mode(raw: &str, fallback_mode: ThemeMode) -> Result<Self, ThemeError> {
        let doc: ThemeDocument = serde_json::from_str(raw)?;
        let mode = doc.mode.unwrap_or(fallback_mode);
        let Some(palette) = doc.edge_palette else {
            return Ok(Self::with_mode(mode));
        };
        let edge_palette = palette
            .iter()
            .map(|c| normalize_hex_color(c))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { mode, edge_palette })
    }
}

/// Parse `#RGB` or `#RRGGBB` values into RGB channels.
#[must_use]
pub fn parse_hex_rgb(raw: &str) -> Option<(u8, u8, u8)> {
    let hex = raw.trim().strip_prefix('#')?;
    let digits = hex
        .chars()
        .map(|c| c.to_digit(16))
        .collect::<Option<Vec<u32>>>()?;

    #[allow(clippy::cast_possible_truncation)]
    let channel = |hi: u32, lo: u32| (hi * 16 + lo) as u8;

    match digits.as_slice() {
        &[r, g, b] => Some((channel(r, r), channel(g, g), channel(b, b))),
        &[r1, r2, g1, g2, b1, b2] => Some((channel(r1, r2), channel(g1, g2), channel(b1, b2))),
        _ => None,
    }
}

/// Normalize a color to canonical lowercase `#rrggbb`.
///
/// # Errors
///
/// Returns [`ThemeError::InvalidColor`] if `raw` is not a hex color.
pub fn normalize_hex_color(raw: &str) -> Result<String, ThemeError> {
    let (r, g, b) = parse_hex_rgb(raw).ok_or_else(|| ThemeError::InvalidColor(raw.to_owned()))?;
    Ok(format!("#{r:02x}{g:02x}{b:02x}"))
}
