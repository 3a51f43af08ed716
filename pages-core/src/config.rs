//! Configuration for pagesd
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (PAGESD_*)
//! 3. Config file (~/.config/pagesd/config.toml)
//! 4. Default values

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Reconciliation-related configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Root of the bare source repositories (`<root>/<owner>/<name>.git`)
    pub repositories: Option<PathBuf>,

    /// Root of the deployment directories (`<root>/<owner>/<name>`)
    pub target: Option<PathBuf>,

    /// Publish branch shared by all repositories
    pub branch: String,

    /// Delay between periodic full syncs
    #[serde(with = "humantime_serde")]
    pub interval: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            repositories: None,
            target: None,
            branch: "gitea-pages".to_string(),
            interval: Duration::from_secs(5 * 60),
        }
    }
}

/// Webhook listener configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the webhook listener binds to
    pub listen_addr: String,

    /// Shared secret expected in the Authorization header
    pub token: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_string(),
            token: None,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Reconciliation configuration
    pub sync: SyncConfig,

    /// Webhook listener configuration
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/pagesd/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("pagesd").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - PAGESD_REPOSITORIES: root of the bare source repositories
    /// - PAGESD_TARGET: root of the deployment directories
    /// - PAGESD_BRANCH: publish branch name
    /// - PAGESD_LISTEN_ADDR: webhook listen address
    /// - PAGESD_TOKEN: webhook shared secret
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(repositories) = std::env::var("PAGESD_REPOSITORIES") {
            self.sync.repositories = Some(PathBuf::from(repositories));
        }

        if let Ok(target) = std::env::var("PAGESD_TARGET") {
            self.sync.target = Some(PathBuf::from(target));
        }

        if let Ok(branch) = std::env::var("PAGESD_BRANCH") {
            self.sync.branch = branch;
        }

        if let Ok(listen_addr) = std::env::var("PAGESD_LISTEN_ADDR") {
            self.server.listen_addr = listen_addr;
        }

        if let Ok(token) = std::env::var("PAGESD_TOKEN") {
            self.server.token = Some(token);
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(
        mut self,
        repositories: Option<PathBuf>,
        target: Option<PathBuf>,
        branch: Option<String>,
        listen_addr: Option<String>,
        interval: Option<Duration>,
    ) -> Self {
        if let Some(repositories) = repositories {
            self.sync.repositories = Some(repositories);
        }

        if let Some(target) = target {
            self.sync.target = Some(target);
        }

        if let Some(branch) = branch {
            self.sync.branch = branch;
        }

        if let Some(listen_addr) = listen_addr {
            self.server.listen_addr = listen_addr;
        }

        if let Some(interval) = interval {
            self.sync.interval = interval;
        }

        self
    }

    /// Resolve into the values the daemon cannot run without
    pub fn resolve(self) -> Result<Settings> {
        let repositories = self.sync.repositories.ok_or_else(|| {
            Error::Config(
                "repositories root is unset (sync.repositories or PAGESD_REPOSITORIES)".to_string(),
            )
        })?;

        let target = self.sync.target.ok_or_else(|| {
            Error::Config("target root is unset (sync.target or PAGESD_TARGET)".to_string())
        })?;

        if self.sync.branch.is_empty() {
            return Err(Error::Config("publish branch is empty".to_string()));
        }

        let token = self
            .server
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                Error::Config("webhook token is unset (server.token or PAGESD_TOKEN)".to_string())
            })?;

        Ok(Settings {
            repositories,
            target,
            branch: self.sync.branch,
            interval: self.sync.interval,
            listen_addr: self.server.listen_addr,
            token,
        })
    }
}

/// Fully-resolved daemon settings
#[derive(Debug, Clone)]
pub struct Settings {
    /// Root of the bare source repositories
    pub repositories: PathBuf,
    /// Root of the deployment directories
    pub target: PathBuf,
    /// Publish branch shared by all repositories
    pub branch: String,
    /// Delay between periodic full syncs
    pub interval: Duration,
    /// Address the webhook listener binds to
    pub listen_addr: String,
    /// Shared secret expected in the Authorization header
    pub token: String,
}
