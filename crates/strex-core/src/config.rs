//! Strex Configuration Management
//!
//! Handles configuration from environment variables, config files,
//! and command-line arguments with defaults matching the extraction rules.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Extraction rule configuration
    pub extraction: ExtractionConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Output configuration
    pub output: OutputConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Extraction
        if let Ok(cues) = std::env::var("STREX_STREAK_CUES") {
            config.extraction.streak_cues = split_list(&cues);
        }
        if let Ok(preps) = std::env::var("STREX_PREPOSITIONS") {
            config.extraction.preposition_allow_list = split_list(&preps);
        }
        if let Ok(strip) = std::env::var("STREX_STRIP_CAPTIONS") {
            config.extraction.strip_captions = parse_bool("STREX_STRIP_CAPTIONS", &strip)?;
        }

        // Output
        if let Ok(pretty) = std::env::var("STREX_PRETTY") {
            config.output.pretty = parse_bool("STREX_PRETTY", &pretty)?;
        }

        // Logging
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(format) = std::env::var("LOG_FORMAT") {
            config.logging.json_format = format.eq_ignore_ascii_case("json");
        }

        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        let env_config = Self::from_env()?;
        let defaults = Self::default();

        // Only override if env values differ from defaults
        if env_config.extraction.streak_cues != defaults.extraction.streak_cues {
            self.extraction.streak_cues = env_config.extraction.streak_cues;
        }
        if env_config.extraction.preposition_allow_list
            != defaults.extraction.preposition_allow_list
        {
            self.extraction.preposition_allow_list = env_config.extraction.preposition_allow_list;
        }
        if env_config.extraction.strip_captions != defaults.extraction.strip_captions {
            self.extraction.strip_captions = env_config.extraction.strip_captions;
        }
        if env_config.output.pretty != defaults.output.pretty {
            self.output.pretty = env_config.output.pretty;
        }
        if env_config.logging.level != defaults.logging.level {
            self.logging.level = env_config.logging.level;
        }
        if env_config.logging.json_format {
            self.logging.json_format = true;
        }

        Ok(self)
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Extraction rule configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Lowercased words that select a sentence as a streak candidate
    pub streak_cues: Vec<String>,

    /// Prepositions of the governing verb worth appending to a statement
    pub preposition_allow_list: Vec<String>,

    /// Report selected sentences with leading datelines removed
    pub strip_captions: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            streak_cues: ["straight", "streak", "consecutive"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            preposition_allow_list: ["since", "at", "to", "in", "of", "without"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            strip_captions: false,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output
    pub pretty: bool,

    /// Keep articles without any statement in the output
    pub keep_empty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            keep_empty: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,

    /// Include file/line in logs
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            include_location: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
