//! Configuration and script file loading for typist.
//!
//! The configuration lives in `config.toml` under the platform config
//! directory. A missing file means defaults; a malformed one is an error.

mod error;
mod script;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;
use typist_core::ColorTheme;
use typist_engine::{Pacing, UnderflowPolicy};

pub use error::ConfigError;
pub use script::{ScriptFormat, load_script, parse_script};

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Platform directories for typist.
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "typist")
}

/// Default location of the configuration file.
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Directory for log files and other generated data.
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Typing behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    /// Initial per-glyph typing interval in milliseconds.
    pub type_delay_ms: u64,
    /// Initial per-glyph deleting interval in milliseconds.
    pub delete_delay_ms: u64,
    pub pacing: Pacing,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            type_delay_ms: 75,
            delete_delay_ms: 50,
            pacing: Pacing::Constant,
        }
    }
}

/// How the greeting is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub color_theme: ColorTheme,
    /// Text drawn after the last glyph.
    pub cursor: String,
    pub cursor_blink: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color_theme: ColorTheme::default(),
            cursor: "|".to_string(),
            cursor_blink: true,
        }
    }
}

/// Script selection and error policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Underflow policy; unset means the build default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underflow: Option<UnderflowPolicy>,
    /// Script file to play instead of the built-in greeting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<PathBuf>,
}

/// User configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub typing: TypingConfig,
    pub display: DisplayConfig,
    pub behavior: BehaviorConfig,
}

impl Config {
    /// Load from the default location, falling back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("no config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = config_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn type_delay(&self) -> Duration {
        Duration::from_millis(self.typing.type_delay_ms)
    }

    pub fn delete_delay(&self) -> Duration {
        Duration::from_millis(self.typing.delete_delay_ms)
    }

    /// Configured underflow policy, or the build default.
    pub fn underflow_policy(&self) -> UnderflowPolicy {
        self.behavior.underflow.unwrap_or_default()
    }
}
