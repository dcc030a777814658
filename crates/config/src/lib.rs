//! Configuration loading, validation, and management for Switchboard.
//!
//! Loads configuration from `~/.switchboard/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.switchboard/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Writer API key for network-backed providers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model the orchestrator routes and synthesizes with
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Orchestrator temperature
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,

    /// Default max tokens per model response
    #[serde(default = "default_max_tokens")]
    pub default_max_tokens: u32,

    /// Memory configuration
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Per-specialist overrides, keyed by domain ("financial", "medical", "creative")
    #[serde(default)]
    pub specialists: HashMap<String, SpecialistConfig>,
}

fn default_model() -> String {
    "palmyra-x5".into()
}
fn default_temperature() -> f32 {
    0.2
}
fn default_max_tokens() -> u32 {
    4096
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("default_model", &self.default_model)
            .field("default_temperature", &self.default_temperature)
            .field("default_max_tokens", &self.default_max_tokens)
            .field("memory", &self.memory)
            .field("specialists", &self.specialists)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Which store to use: "in_memory" or "none"
    #[serde(default = "default_memory_backend")]
    pub backend: String,

    /// How many prior memories a recall may return
    #[serde(default = "default_recall_limit")]
    pub recall_limit: usize,

    /// Stored session summaries are cut to this many characters
    #[serde(default = "default_summary_max_chars")]
    pub summary_max_chars: usize,
}

fn default_memory_backend() -> String {
    "in_memory".into()
}
fn default_recall_limit() -> usize {
    5
}
fn default_summary_max_chars() -> usize {
    800
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            backend: default_memory_backend(),
            recall_limit: default_recall_limit(),
            summary_max_chars: default_summary_max_chars(),
        }
    }
}

/// Optional per-specialist model settings, layered over the built-in catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecialistConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl AppConfig {
    /// Load configuration from the default path (~/.switchboard/config.toml).
    ///
    /// Also checks environment variables for the API key:
    /// - `SWITCHBOARD_API_KEY` (highest priority)
    /// - `WRITER_API_KEY`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        // Environment variable overrides (highest priority)
        if config.api_key.is_none() {
            config.api_key = std::env::var("SWITCHBOARD_API_KEY")
                .ok()
                .or_else(|| std::env::var("WRITER_API_KEY").ok());
        }

        // Allow env var to override the orchestrator model
        if let Ok(model) = std::env::var("SWITCHBOARD_MODEL") {
            config.default_model = model;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".switchboard")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.default_temperature < 0.0 || self.default_temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "default_temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.memory.recall_limit == 0 {
            return Err(ConfigError::ValidationError(
                "memory.recall_limit must be at least 1".into(),
            ));
        }

        if self.memory.backend != "in_memory" && self.memory.backend != "none" {
            return Err(ConfigError::ValidationError(format!(
                "unknown memory backend '{}' (expected 'in_memory' or 'none')",
                self.memory.backend
            )));
        }

        for (name, specialist) in &self.specialists {
            if let Some(t) = specialist.temperature {
                if !(0.0..=2.0).contains(&t) {
                    return Err(ConfigError::ValidationError(format!(
                        "specialists.{name}.temperature must be between 0.0 and 2.0"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate a default config TOML string (for first-run setup).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_model: default_model(),
            default_temperature: default_temperature(),
            default_max_tokens: default_max_tokens(),
            memory: MemoryConfig::default(),
            specialists: HashMap::new(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
