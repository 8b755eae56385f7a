use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

/// Root arbiter configuration loaded from YAML. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ArbiterConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ArbiterConfig {
    /// Reads and validates the given YAML file, or returns the defaults when
    /// there is none.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_yaml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate().map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config)
    }

    /// An empty document means all defaults.
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_path("input.path", self.input.path.as_deref())?;
        validate_path("output.path", self.output.path.as_deref())?;
        self.logging.validate()?;

        let files = [
            ("input.path", self.input.path.as_deref()),
            ("output.path", self.output.path.as_deref()),
            ("logging.file", self.logging.file.as_deref()),
        ];
        for (i, &(first, left)) in files.iter().enumerate() {
            for &(second, right) in &files[i + 1..] {
                match (left, right) {
                    (Some(left), Some(right)) if left == right => {
                        return Err(ValidationError::SharedFile {
                            first,
                            second,
                            path: left.to_path_buf(),
                        });
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct InputConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Abort on the first malformed or refused command.
    #[serde(default = "default_strict")]
    pub strict: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: None,
            strict: default_strict(),
        }
    }
}

fn default_strict() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Jsonl,
}

/// Logging configuration defaults to plain text on stderr.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            file: None,
        }
    }
}

impl LoggingConfig {
    fn validate(&mut self) -> Result<(), ValidationError> {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }

        if self.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.tracing_level".to_string(),
                message: format!("unknown level '{}'", self.tracing_level),
            });
        }

        validate_path("logging.file", self.file.as_deref())?;
        if self.enable_structured && self.file.is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.file".to_string(),
                message: "structured logging requires a log file".to_string(),
            });
        }

        Ok(())
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "warn".to_string()
}

fn validate_path(field: &str, path: Option<&Path>) -> Result<(), ValidationError> {
    match path {
        Some(path) if path.as_os_str().is_empty() => Err(ValidationError::InvalidField {
            field: field.to_string(),
            message: "path must not be empty".to_string(),
        }),
        _ => Ok(()),
    }
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("config {} is not valid YAML: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("config {}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
    #[error("{first} and {second} both name {}", path.display())]
    SharedFile {
        first: &'static str,
        second: &'static str,
        path: PathBuf,
    },
}
