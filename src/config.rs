//! Application configuration loaded from TOML with environment overrides.

use std::path::Path;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::game_service::GameRules;

/// Environment variable overriding `database_url`.
pub const DATABASE_URL_VAR: &str = "PAJELINGO_DATABASE_URL";
/// Environment variable overriding `port`.
pub const PORT_VAR: &str = "PAJELINGO_PORT";

/// Server and game configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path of the SQLite database file.
    #[serde(default = "default_database_url")]
    database_url: String,

    /// Address the HTTP server binds to.
    #[serde(default = "default_host")]
    host: String,

    /// Port the HTTP server binds to.
    #[serde(default = "default_port")]
    port: u16,

    /// Languages without grammatical articles.
    #[serde(default = "default_article_free_languages")]
    article_free_languages: Vec<String>,

    /// Single-language total that unlocks Linguistic Mastery.
    #[serde(default = "default_mastery_threshold")]
    mastery_threshold: i64,

    /// Number of entries a leaderboard shows.
    #[serde(default = "default_ranking_limit")]
    ranking_limit: usize,
}

fn default_database_url() -> String {
    "pajelingo.db".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_article_free_languages() -> Vec<String> {
    vec!["English".to_string()]
}

fn default_mastery_threshold() -> i64 {
    100
}

fn default_ranking_limit() -> usize {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            host: default_host(),
            port: default_port(),
            article_free_languages: default_article_free_languages(),
            mastery_threshold: default_mastery_threshold(),
            ranking_limit: default_ranking_limit(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text. Missing keys take their defaults.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        info!(database = %config.database_url, port = config.port, "Config loaded");
        Ok(config)
    }

    /// Loads `.env`, then the optional file, then applies environment overrides.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Ok(env_file) = dotenvy::dotenv() {
            debug!(path = %env_file.display(), "Loaded .env");
        }
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies `PAJELINGO_DATABASE_URL` and `PAJELINGO_PORT` from the given lookup.
    #[instrument(skip(self, lookup))]
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = lookup(DATABASE_URL_VAR) {
            debug!(var = DATABASE_URL_VAR, "Overriding database_url");
            self.database_url = url;
        }
        if let Some(port) = lookup(PORT_VAR) {
            self.port = port
                .parse()
                .map_err(|e| ConfigError::new(format!("Invalid {}: {}", PORT_VAR, e)))?;
        }
        Ok(self)
    }

    /// Game rules derived from this configuration.
    pub fn rules(&self) -> GameRules {
        GameRules {
            article_free_languages: self.article_free_languages.clone(),
            mastery_threshold: self.mastery_threshold,
        }
    }

    /// `host:port` bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
