/// Configuration system for smart-jump
///
/// Supports loading from multiple sources with priority:
/// CLI args > Environment variables > Config file > Defaults
use crate::classifier::DEFAULT_C_BLOCK_WINDOW;
use crate::error::{ConfigError, SmartJumpError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Largest accepted C/C++ block lookahead
pub const MAX_C_BLOCK_WINDOW: usize = 16;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Host command names and diagnostic output
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Classifier tuning
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

/// Dispatch configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Name of the host's go-to-definition command (the one that gets wrapped)
    #[serde(default = "default_definition_command")]
    pub definition_command: String,

    /// Name of the host's find-references command
    #[serde(default = "default_references_command")]
    pub references_command: String,

    /// Trace which branch each smart jump takes
    #[serde(default)]
    pub debug: DebugOutput,
}

/// Classifier configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Lines after a C/C++ signature searched for an opening `{`
    #[serde(default = "default_c_block_window")]
    pub c_block_window: usize,
}

/// Diagnostic output toggle, written as `"on"` or `"off"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebugOutput {
    On,
    #[default]
    Off,
}

impl DebugOutput {
    pub fn is_on(self) -> bool {
        self == DebugOutput::On
    }
}

impl From<bool> for DebugOutput {
    fn from(on: bool) -> Self {
        if on { DebugOutput::On } else { DebugOutput::Off }
    }
}

impl FromStr for DebugOutput {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "on" => Ok(DebugOutput::On),
            "off" => Ok(DebugOutput::Off),
            other => Err(ConfigError::InvalidValue {
                key: "dispatch.debug".to_string(),
                reason: format!("must be 'on' or 'off', got '{}'", other),
            }),
        }
    }
}

impl fmt::Display for DebugOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebugOutput::On => f.write_str("on"),
            DebugOutput::Off => f.write_str("off"),
        }
    }
}

// Default value functions
fn default_definition_command() -> String {
    "goto-definition".to_string()
}

fn default_references_command() -> String {
    "find-references".to_string()
}

fn default_c_block_window() -> usize {
    DEFAULT_C_BLOCK_WINDOW
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            definition_command: default_definition_command(),
            references_command: default_references_command(),
            debug: DebugOutput::default(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            c_block_window: default_c_block_window(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: &Path) -> Result<Self, SmartJumpError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadFailed(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseFailed(format!("Invalid TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default location or create default
    pub fn load_or_default() -> Result<Self, SmartJumpError> {
        let config_path = crate::paths::PlatformPaths::default_config_path();

        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            Self::from_file(&config_path)
        } else {
            tracing::debug!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<(), SmartJumpError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::SaveFailed(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveFailed(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| ConfigError::SaveFailed(format!("Failed to write config file: {}", e)))?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Save to default location
    pub fn save_default(&self) -> Result<(), SmartJumpError> {
        let config_path = crate::paths::PlatformPaths::default_config_path();
        self.save(&config_path)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), SmartJumpError> {
        if self.dispatch.definition_command.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "dispatch.definition_command".to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        if self.dispatch.references_command.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "dispatch.references_command".to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        // Wrapping a command around itself would recurse forever
        if self.dispatch.definition_command == self.dispatch.references_command {
            return Err(ConfigError::InvalidValue {
                key: "dispatch.references_command".to_string(),
                reason: format!(
                    "must differ from dispatch.definition_command ('{}')",
                    self.dispatch.definition_command
                ),
            }
            .into());
        }

        if self.classifier.c_block_window > MAX_C_BLOCK_WINDOW {
            return Err(ConfigError::InvalidValue {
                key: "classifier.c_block_window".to_string(),
                reason: format!(
                    "must be at most {}, got {}",
                    MAX_C_BLOCK_WINDOW, self.classifier.c_block_window
                ),
            }
            .into());
        }

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(debug) = std::env::var("SMART_JUMP_DEBUG")
            && let Ok(debug) = debug.parse()
        {
            self.dispatch.debug = debug;
        }

        if let Ok(name) = std::env::var("SMART_JUMP_DEFINITION_COMMAND") {
            self.dispatch.definition_command = name;
        }

        if let Ok(name) = std::env::var("SMART_JUMP_REFERENCES_COMMAND") {
            self.dispatch.references_command = name;
        }

        if let Ok(window) = std::env::var("SMART_JUMP_C_BLOCK_WINDOW")
            && let Ok(window) = window.parse()
        {
            self.classifier.c_block_window = window;
        }
    }

    /// Create a new Config with defaults and environment overrides
    pub fn new() -> Result<Self, SmartJumpError> {
        let mut config = Self::load_or_default()?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }
}
