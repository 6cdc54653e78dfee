//! Configuration for errcode (config.json or errcode.toml)

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::definition::DEFAULT_MESSAGE_OPTION;

/// Config file used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service-level code choices
    pub service_codes: Vec<CodeLabel>,

    /// Module-level code choices
    pub module_codes: Vec<CodeLabel>,

    /// Language tags a message is asked for, `default` included
    #[serde(alias = "languages")]
    pub i18n: Vec<String>,

    /// Definition file to edit
    pub file_path: PathBuf,

    /// Option name used for message attributes
    #[serde(default = "default_message_option")]
    pub message_option: String,
}

/// One selectable code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeLabel {
    /// Digits contributed to the prefix
    pub code: String,

    /// Short name shown in menus
    pub label: String,

    /// Longer description
    #[serde(default, alias = "description")]
    pub desc: String,
}

fn default_message_option() -> String {
    DEFAULT_MESSAGE_OPTION.to_string()
}

impl Config {
    /// Load a config file; `.toml` files are read as TOML, everything else as JSON
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let parsed = if path.extension().is_some_and(|ext| ext == "toml") {
            Self::parse_toml(&content)
        } else {
            Self::parse_json(&content)
        };

        let config = parsed.map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Parse a config from a JSON string
    pub fn parse_json(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            message: e.to_string(),
        })
    }

    /// Parse a config from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            message: e.to_string(),
        })
    }

    /// Check the choices are usable for prompting and allocation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_codes.is_empty() {
            return Err(ConfigError::Validation(
                "`service_codes` must list at least one code".to_string(),
            ));
        }
        if self.module_codes.is_empty() {
            return Err(ConfigError::Validation(
                "`module_codes` must list at least one code".to_string(),
            ));
        }
        for item in self.service_codes.iter().chain(&self.module_codes) {
            if item.code.is_empty() || !item.code.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ConfigError::Validation(format!(
                    "code `{}` ({}) must be digits only",
                    item.code, item.label
                )));
            }
        }
        if self.i18n.is_empty() {
            return Err(ConfigError::Validation(
                "`i18n` must list at least one language".to_string(),
            ));
        }
        if self.file_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "`file_path` must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Config errors
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("could not read config {}: {source}", .path.display())]
    #[diagnostic(
        code(errcode::config::io),
        help("pass --config or create config.json in the working directory")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config {}: {message}", .path.display())]
    #[diagnostic(code(errcode::config::parse))]
    Parse { path: PathBuf, message: String },

    #[error("invalid config: {0}")]
    #[diagnostic(code(errcode::config::validation))]
    Validation(String),
}

#[cfg(test)]
mod tests;
