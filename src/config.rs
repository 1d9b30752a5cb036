//! Configuration loading for Herbarium.
//!
//! Configuration follows a precedence chain:
//! 1. Environment variables (highest priority)
//! 2. Project config (`.herbarium/config.toml`)
//! 3. User config (`~/.herbarium/config.toml`)
//! 4. Defaults (lowest priority)
//!
//! All configuration is optional. The system runs with sensible defaults
//! when no config exists.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{FailOpen, HerbariumError, Result};
use crate::util::read_to_string_limited;

/// Main configuration struct for Herbarium.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Interactive and scripted session settings.
    pub session: SessionConfig,
    /// Report rendering settings.
    pub report: ReportConfig,
}

/// Session configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Prompt printed before each interactive command.
    pub prompt: String,
    /// File printed by HELP. The built-in help text is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_file: Option<PathBuf>,
    /// How deeply READ may nest scripts inside scripts.
    pub max_script_depth: u32,
}

/// Default interactive prompt.
pub const DEFAULT_PROMPT: &str = "Enter command (ADD, REM, PRINT, HELP, READ or EXIT): ";

/// Minimum valid max_script_depth (a top-level READ needs one level).
pub const MIN_SCRIPT_DEPTH: u32 = 1;

impl SessionConfig {
    /// Check if max_script_depth is valid (must be >= 1).
    pub fn is_valid_script_depth(value: u32) -> bool {
        value >= MIN_SCRIPT_DEPTH
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            help_file: None,
            max_script_depth: 8,
        }
    }
}

/// Valid values for the report format field.
pub const VALID_FORMATS: &[&str] = &["text", "json"];

/// Report configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format: "text" or "json".
    pub format: String,
}

impl ReportConfig {
    /// Check if a format value is valid.
    pub fn is_valid_format(value: &str) -> bool {
        VALID_FORMATS.contains(&value)
    }

    /// Whether reports should be rendered as JSON.
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
        }
    }
}

impl Config {
    /// Load configuration with full precedence chain.
    ///
    /// Falls back to user config and environment only when the working
    /// directory is unavailable.
    pub fn load() -> Self {
        match env::current_dir() {
            Ok(cwd) => Self::load_from_cwd(&cwd),
            Err(_) => {
                let mut config = Config::default();
                if let Some(user_config) = Self::load_user_config() {
                    config = config.merge(user_config);
                }
                config.apply_env_overrides();
                config
            }
        }
    }

    /// Load configuration with a specific working directory.
    pub fn load_from_cwd(cwd: &Path) -> Self {
        let mut config = Config::default();

        if let Some(user_config) = Self::load_user_config() {
            config = config.merge(user_config);
        }

        if let Some(project_config) = Self::load_project_config(cwd) {
            config = config.merge(project_config);
        }

        config.apply_env_overrides();

        config
    }

    /// Load user config from `~/.herbarium/config.toml`.
    fn load_user_config() -> Option<Config> {
        let path = herbarium_home()?.join("config.toml");
        Self::load_optional(&path)
    }

    /// Load project config from `.herbarium/config.toml` in the given directory.
    fn load_project_config(cwd: &Path) -> Option<Config> {
        let path = cwd.join(".herbarium").join("config.toml");
        Self::load_optional(&path)
    }

    /// Load a config file that may legitimately be missing.
    ///
    /// Missing files are silent; unreadable or invalid ones are logged and
    /// skipped.
    fn load_optional(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        Self::load_from_file(path)
            .map(Some)
            .fail_open_default(&format!("loading {}", path.display()))
    }

    /// Load config from a specific file path.
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = read_to_string_limited(path)?;
        toml::from_str(&content).map_err(|e| HerbariumError::config(e.to_string()))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        // HERBARIUM_PROMPT
        if let Ok(val) = env::var("HERBARIUM_PROMPT") {
            self.session.prompt = val;
        }

        // HERBARIUM_HELP_FILE
        if let Ok(val) = env::var("HERBARIUM_HELP_FILE") {
            if val.is_empty() {
                self.session.help_file = None;
            } else {
                self.session.help_file = Some(PathBuf::from(val));
            }
        }

        // HERBARIUM_MAX_SCRIPT_DEPTH
        if let Ok(val) = env::var("HERBARIUM_MAX_SCRIPT_DEPTH") {
            match val.parse::<u32>() {
                Ok(n) if SessionConfig::is_valid_script_depth(n) => {
                    self.session.max_script_depth = n;
                }
                _ => tracing::warn!(
                    "Invalid HERBARIUM_MAX_SCRIPT_DEPTH value '{}'. \
                    Expected an integer >= {}. Using '{}'.",
                    val,
                    MIN_SCRIPT_DEPTH,
                    self.session.max_script_depth
                ),
            }
        }

        // HERBARIUM_REPORT_FORMAT
        if let Ok(val) = env::var("HERBARIUM_REPORT_FORMAT") {
            if ReportConfig::is_valid_format(&val) {
                self.report.format = val;
            } else {
                tracing::warn!(
                    "Invalid HERBARIUM_REPORT_FORMAT value '{}'. \
                    Valid values: {:?}. Using '{}'.",
                    val,
                    VALID_FORMATS,
                    self.report.format
                );
            }
        }
    }

    /// Merge another config into this one.
    ///
    /// Field by field: every non-default value in `other` wins. A layer
    /// cannot set a value back to its default over a lower layer.
    fn merge(mut self, other: Config) -> Self {
        let default_session = SessionConfig::default();
        if other.session.prompt != default_session.prompt {
            self.session.prompt = other.session.prompt;
        }
        if other.session.help_file.is_some() {
            self.session.help_file = other.session.help_file;
        }
        if other.session.max_script_depth != default_session.max_script_depth {
            if SessionConfig::is_valid_script_depth(other.session.max_script_depth) {
                self.session.max_script_depth = other.session.max_script_depth;
            } else {
                tracing::warn!(
                    "Ignoring max_script_depth = {} (must be >= {})",
                    other.session.max_script_depth,
                    MIN_SCRIPT_DEPTH
                );
            }
        }

        if other.report.format != ReportConfig::default().format {
            if ReportConfig::is_valid_format(&other.report.format) {
                self.report.format = other.report.format;
            } else {
                tracing::warn!(
                    "Ignoring report format '{}' (valid: {:?})",
                    other.report.format,
                    VALID_FORMATS
                );
            }
        }

        self
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| HerbariumError::config(e.to_string()))
    }
}

/// Get the Herbarium home directory.
///
/// Checks `HERBARIUM_HOME` first, then falls back to `~/.herbarium`.
/// An empty `HERBARIUM_HOME` is ignored.
pub fn herbarium_home() -> Option<PathBuf> {
    if let Ok(home) = env::var("HERBARIUM_HOME") {
        if home.is_empty() {
            tracing::warn!("HERBARIUM_HOME is empty, using default");
        } else {
            return Some(PathBuf::from(home));
        }
    }

    dirs::home_dir().map(|home| home.join(".herbarium"))
}
