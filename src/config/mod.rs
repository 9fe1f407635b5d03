//! Configuration management for quakewatch.
//!
//! Configuration is read from `~/.config/quakewatch/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;
pub mod keybindings;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::query::{DEFAULT_BASE_URL, DEFAULT_LIMIT, DEFAULT_MIN_MAGNITUDE};
use crate::domain::FeedQuery;
use crate::fetcher::http_fetcher::DEFAULT_TIMEOUT_SECS;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub feed: FeedConfig,
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

/// Upstream event service settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub base_url: String,
    /// Decimal string, sent verbatim as `minmag`.
    pub min_magnitude: String,
    pub limit: u32,
    pub timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            min_magnitude: DEFAULT_MIN_MAGNITUDE.to_string(),
            limit: DEFAULT_LIMIT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl FeedConfig {
    pub fn query(&self) -> FeedQuery {
        FeedQuery::new(&self.base_url, &self.min_magnitude, self.limit)
    }
}

impl Config {
    /// Load configuration from `config_path`.
    ///
    /// If the file doesn't exist, creates a default one with comments.
    /// Missing fields use default values; an invalid file is an error.
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/quakewatch/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("quakewatch").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn default_config_content() -> &'static str {
        r##"# quakewatch configuration
#
# Colors can be specified as:
# - Named colors: Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
#   DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
#   LightCyan, White, Reset
# - Hex colors: "#RRGGBB" or "#RGB"
#
# Keybindings can be specified as:
# - Single characters: "a", "A", "1", "="
# - Special keys: Enter, Tab, Backspace, Delete, Home, End, PageUp, PageDown,
#   Up, Down, Left, Right, Esc, Space, Plus, Minus, F1-F12
# - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter"

[feed]
# FDSN event query endpoint
base_url = "https://earthquake.usgs.gov/fdsnws/event/1/query"

# Only events at or above this magnitude are requested
min_magnitude = "6"

# Maximum number of events per request
limit = 10

# Request timeout in seconds
timeout_secs = 10

[colors]
active_border = "Cyan"
selection_bg = "DarkGray"
selection_fg = "White"
location_offset = "Gray"
location_primary = "White"
date_time = "Gray"
magnitude_text = "White"
status_fg = "White"
status_bg = "DarkGray"

# Magnitude badge colors, by integer part of the magnitude
magnitude1 = "#4A7BA7"
magnitude2 = "#04B4B3"
magnitude3 = "#10CAC9"
magnitude4 = "#F5A623"
magnitude5 = "#FF7D50"
magnitude6 = "#FC6644"
magnitude7 = "#E75F40"
magnitude8 = "#E13A20"
magnitude9 = "#D93218"
magnitude10plus = "#C03823"

[keybindings]
quit = ["q", "Ctrl+c"]
move_up = ["k", "Up"]
move_down = ["j", "Down"]
next_page = ["n", "PageDown"]
prev_page = ["p", "PageUp"]
open_in_browser = ["o", "Enter"]
refresh = ["R", "F5"]
clear = ["c"]
raise_min_magnitude = ["Plus", "="]
lower_min_magnitude = ["Minus"]
"##
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
