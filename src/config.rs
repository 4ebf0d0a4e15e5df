//! Configuration loading and management for scout.
//!
//! Tunables come from `scout.toml`; credentials are always read from the
//! process environment and are required before any command runs.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable holding the Gemini API key
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Environment variable holding the Custom Search API key
pub const SEARCH_API_KEY_VAR: &str = "GOOGLE_SEARCH_API_KEY";
/// Environment variable holding the Programmable Search Engine id
pub const SEARCH_ENGINE_ID_VAR: &str = "GOOGLE_SEARCH_ENGINE_ID";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("required environment variable {0} is not set")]
    MissingEnv(&'static str),
}

/// Generation model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Gemini model identifier (e.g., "gemini-2.0-flash")
    pub model: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
        }
    }
}

/// Search request configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum number of results requested per query (the API caps this at 10)
    pub max_results: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_results: 10 }
    }
}

/// API credentials, loaded from the environment only
#[derive(Debug, Clone)]
pub struct Credentials {
    pub gemini_api_key: String,
    pub search_api_key: String,
    pub search_engine_id: String,
}

impl Credentials {
    /// Read all required credentials from the environment.
    ///
    /// Fails on the first missing variable with its name in the message.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            gemini_api_key: require_env(GEMINI_API_KEY_VAR)?,
            search_api_key: require_env(SEARCH_API_KEY_VAR)?,
            search_engine_id: require_env(SEARCH_ENGINE_ID_VAR)?,
        })
    }
}

fn require_env(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnv(name)),
    }
}

/// File-backed tunables; everything has a sensible default
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct FileConfig {
    #[serde(default)]
    agent: AgentConfig,
    #[serde(default)]
    search: SearchConfig,
}

/// Root configuration structure
#[derive(Debug, Clone)]
pub struct Config {
    pub agent: AgentConfig,
    pub search: SearchConfig,
    pub credentials: Credentials,
}

impl Config {
    /// Load configuration: credentials from the environment, tunables from
    /// `scout.toml` if one exists (cwd first, then the user config dir).
    pub fn load() -> Result<Self, ConfigError> {
        let credentials = Credentials::from_env()?;
        let file = match Self::find_config_file() {
            Some(path) => FileConfig::read(&path)?,
            None => FileConfig::default(),
        };

        Ok(Self {
            agent: file.agent,
            search: file.search,
            credentials,
        })
    }

    /// Load configuration with tunables from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let credentials = Credentials::from_env()?;
        let file = FileConfig::read(path)?;

        Ok(Self {
            agent: file.agent,
            search: file.search,
            credentials,
        })
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let local_config = PathBuf::from("scout.toml");
        if local_config.exists() {
            return Some(local_config);
        }

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config").join("scout").join("scout.toml");
            if home_config.exists() {
                return Some(home_config);
            }
        }

        None
    }
}

impl FileConfig {
    fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_sensible() {
        let agent = AgentConfig::default();
        assert_eq!(agent.model, "gemini-2.0-flash");

        let search = SearchConfig::default();
        assert_eq!(search.max_results, 10);
    }

    #[test]
    fn file_config_parses_full_document() {
        let toml = r#"
            [agent]
            model = "gemini-2.5-pro"

            [search]
            max_results = 5
        "#;
        let file: FileConfig = toml::from_str(toml).unwrap();
        assert_eq!(file.agent.model, "gemini-2.5-pro");
        assert_eq!(file.search.max_results, 5);
    }

    #[test]
    fn file_config_fills_missing_sections_with_defaults() {
        let toml = r#"
            [agent]
            model = "gemini-2.5-flash"
        "#;
        let file: FileConfig = toml::from_str(toml).unwrap();
        assert_eq!(file.agent.model, "gemini-2.5-flash");
        assert_eq!(file.search.max_results, 10);
    }

    #[test]
    fn file_config_reads_from_disk() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "[search]\nmax_results = 3").unwrap();

        let file = FileConfig::read(tmp.path()).unwrap();
        assert_eq!(file.search.max_results, 3);
        assert_eq!(file.agent.model, "gemini-2.0-flash");
    }

    #[test]
    fn file_config_rejects_malformed_toml() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "[search\nmax_results = ").unwrap();

        let err = FileConfig::read(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn missing_env_var_is_reported_by_name() {
        let err = require_env("SCOUT_TEST_DEFINITELY_UNSET").unwrap_err();
        assert_eq!(
            err.to_string(),
            "required environment variable SCOUT_TEST_DEFINITELY_UNSET is not set"
        );
    }
}
