//! YAML configuration file support.
//!
//! Loads tokenizer and integrity settings from a single YAML file so a
//! deployment can pin its rule ordering and flag threshold.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "cs101-autumn"
//!
//! tokenizer:
//!   version: 1
//!   order: "rule_major"
//!   max_lines: 100000
//!
//! integrity:
//!   version: 1
//!   flag_threshold: 70
//!   explain: false
//!   use_parallel: true
//! ```

use std::fs;
use std::path::Path;

use integrity::IntegrityConfig;
use logic::{TokenOrder, TokenizerConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct LogicfpConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub tokenizer: TokenizerYamlConfig,

    #[serde(default)]
    pub integrity: IntegrityYamlConfig,
}

impl LogicfpConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: LogicfpConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.tokenizer.validate()?;
        self.integrity.validate()?;
        Ok(())
    }

    pub fn tokenizer_config(&self) -> TokenizerConfig {
        TokenizerConfig {
            version: self.tokenizer.version,
            order: self.tokenizer.order,
            max_lines: self.tokenizer.max_lines,
        }
    }

    pub fn integrity_config(&self) -> IntegrityConfig {
        IntegrityConfig {
            version: self.integrity.version,
            flag_threshold: self.integrity.flag_threshold,
            explain: self.integrity.explain,
            use_parallel: self.integrity.use_parallel,
        }
    }
}

impl Default for LogicfpConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            tokenizer: TokenizerYamlConfig::default(),
            integrity: IntegrityYamlConfig::default(),
        }
    }
}

/// Tokenizer YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenizerYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub order: TokenOrder,

    #[serde(default = "default_max_lines")]
    pub max_lines: Option<usize>,
}

impl TokenizerYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.version == 0 {
            return Err(ConfigLoadError::Validation(
                "tokenizer.version must be >= 1".to_string(),
            ));
        }
        if self.max_lines == Some(0) {
            return Err(ConfigLoadError::Validation(
                "tokenizer.max_lines must be >= 1 when set".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for TokenizerYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            order: TokenOrder::RuleMajor,
            max_lines: default_max_lines(),
        }
    }
}

/// Integrity engine YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntegrityYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_flag_threshold")]
    pub flag_threshold: u8,

    #[serde(default)]
    pub explain: bool,

    #[serde(default = "true_value")]
    pub use_parallel: bool,
}

impl IntegrityYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.version == 0 {
            return Err(ConfigLoadError::Validation(
                "integrity.version must be >= 1".to_string(),
            ));
        }
        if !(1..=100).contains(&self.flag_threshold) {
            return Err(ConfigLoadError::Validation(format!(
                "integrity.flag_threshold must be in 1..=100, got {}",
                self.flag_threshold
            )));
        }
        Ok(())
    }
}

impl Default for IntegrityYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            flag_threshold: default_flag_threshold(),
            explain: false,
            use_parallel: true,
        }
    }
}

fn default_version() -> u32 {
    1
}
fn true_value() -> bool {
    true
}
fn default_max_lines() -> Option<usize> {
    Some(100_000)
}
fn default_flag_threshold() -> u8 {
    IntegrityConfig::DEFAULT_FLAG_THRESHOLD
}
