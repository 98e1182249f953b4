//! Configuration management for planport
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (PLANPORT_*)
//! 3. Config file (~/.config/planport/config.toml)
//! 4. Default values

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Result};

/// Default GitHub GraphQL endpoint
pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// GitHub-related configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// GraphQL endpoint
    pub graphql_url: String,

    /// How many project fields to fetch during discovery
    pub field_page_size: u32,

    /// Name of the single-select field that holds task status
    pub status_field: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            field_page_size: 50,
            status_field: "status".to_string(),
        }
    }
}

/// Import-related configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Task file used when none is given on the command line
    pub input: PathBuf,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("learning-plan.json"),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// GitHub configuration
    pub github: GitHubConfig,

    /// Import configuration
    pub import: ImportConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/planport/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("planport").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - PLANPORT_GRAPHQL_URL: GraphQL endpoint
    /// - PLANPORT_STATUS_FIELD: Name of the status field
    /// - PLANPORT_INPUT: Default task file
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("PLANPORT_GRAPHQL_URL") {
            self.github.graphql_url = url;
        }

        if let Ok(field) = std::env::var("PLANPORT_STATUS_FIELD") {
            self.github.status_field = field;
        }

        if let Ok(input) = std::env::var("PLANPORT_INPUT") {
            self.import.input = PathBuf::from(input);
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(
        mut self,
        graphql_url: Option<String>,
        status_field: Option<String>,
    ) -> Self {
        if let Some(url) = graphql_url {
            self.github.graphql_url = url;
        }

        if let Some(field) = status_field {
            self.github.status_field = field;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(
        graphql_url: Option<String>,
        status_field: Option<String>,
    ) -> Result<Self> {
        let config = Self::load()?
            .with_env_overrides()
            .with_cli_overrides(graphql_url, status_field);
        config.validate()?;
        Ok(config)
    }

    /// Check values that would otherwise fail at request time
    pub fn validate(&self) -> Result<()> {
        self.graphql_endpoint()?;

        if self.github.field_page_size == 0 || self.github.field_page_size > 100 {
            return Err(Error::Config(format!(
                "field_page_size must be between 1 and 100, got {}",
                self.github.field_page_size
            )));
        }

        if self.github.status_field.trim().is_empty() {
            return Err(Error::Config("status_field must not be empty".to_string()));
        }

        Ok(())
    }

    /// Parsed GraphQL endpoint
    pub fn graphql_endpoint(&self) -> Result<Url> {
        Url::parse(&self.github.graphql_url).map_err(|e| {
            Error::Config(format!(
                "Invalid graphql_url '{}': {}",
                self.github.graphql_url, e
            ))
        })
    }
}

/// Repository and project node ids to import into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportTarget {
    /// Repository node id (REPO_ID)
    pub repository_id: String,
    /// Project node id (PROJECT_ID)
    pub project_id: String,
}

impl ImportTarget {
    /// Build a target, failing when either id is missing or blank
    pub fn resolve(repository_id: Option<String>, project_id: Option<String>) -> Result<Self> {
        Ok(Self {
            repository_id: require(repository_id, "REPO_ID (--repo-id)")?,
            project_id: require(project_id, "PROJECT_ID (--project-id)")?,
        })
    }
}

/// Require a non-blank value, naming it in the error
pub fn require(value: Option<String>, name: &str) -> Result<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::MissingEnv(name.to_string()))
}
