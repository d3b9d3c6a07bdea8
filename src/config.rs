//! Configuration loading and management
//!
//! Handles parsing of the optional `config.toml`. Everything has a default:
//! the board file lives in the platform data directory, and the suggestion
//! client targets the Gemini API with the key taken from the environment at
//! request time (a missing key is not a startup error).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::store::BOARD_FILE;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Board persistence configuration
    #[serde(default)]
    pub board: BoardConfig,

    /// Subtask suggestion configuration
    #[serde(default)]
    pub suggest: SuggestConfig,
}

/// Board-related configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Board file path; defaults to the platform data directory
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Suggestion-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestConfig {
    /// Model requested from the generative API
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl SuggestConfig {
    /// Read the API key from the configured environment variable.
    ///
    /// Absence is reported only when a suggestion is actually requested.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicitly given path must exist; otherwise the default location
    /// is used when present and built-in defaults apply when it is not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::ConfigNotFound(path.to_path_buf()));
                }
                path.to_path_buf()
            }
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the board file path: CLI override, then config, then default.
    pub fn board_file(&self, cli_override: Option<&Path>) -> PathBuf {
        if let Some(path) = cli_override {
            return path.to_path_buf();
        }
        if let Some(path) = &self.board.file {
            return path.clone();
        }
        default_board_file()
    }
}

fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "kb")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

fn default_board_file() -> PathBuf {
    directories::ProjectDirs::from("", "", "kb")
        .map(|dirs| dirs.data_dir().join(BOARD_FILE))
        .unwrap_or_else(|| PathBuf::from(BOARD_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_all_sections() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.board.file.is_none());
        assert_eq!(config.suggest.model, "gemini-3-flash-preview");
        assert_eq!(config.suggest.api_key_env, "GEMINI_API_KEY");
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [suggest]
            model = "gemini-2.0-pro"
            "#,
        )
        .unwrap();
        assert_eq!(config.suggest.model, "gemini-2.0-pro");
        assert_eq!(
            config.suggest.base_url,
            "https://generativelanguage.googleapis.com"
        );
    }

    #[test]
    fn cli_override_wins_over_config() {
        let config: Config = toml::from_str(
            r#"
            [board]
            file = "/tmp/from-config.json"
            "#,
        )
        .unwrap();
        let cli = PathBuf::from("/tmp/from-cli.json");
        assert_eq!(config.board_file(Some(&cli)), cli);
        assert_eq!(
            config.board_file(None),
            PathBuf::from("/tmp/from-config.json")
        );
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let result = Config::load(Some(Path::new("/nonexistent/kb.toml")));
        assert!(matches!(result, Err(Error::ConfigNotFound(_))));
    }
}
