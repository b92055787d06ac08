//! Configuration management for ssokey

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Default region for Identity Center API calls when none is configured
pub const DEFAULT_SSO_REGION: &str = "us-east-1";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Identity Center start URL (e.g. https://d-xxxxxxxxxx.awsapps.com/start)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_url: Option<String>,

    /// Region where the Identity Center instance lives
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sso_region: Option<String>,

    /// Cached SSO access token from the last device-flow login
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<CachedToken>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// SSO access token with expiry, cached between runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedToken {
    /// The opaque access token string
    pub access_token: String,

    /// Token expiration time
    pub expires_at: DateTime<Utc>,
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Default account-name filters for list/sync
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name_filters: Vec<String>,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".ssokey").join("config.yaml"))
    }

    /// Resolve the config path, honoring an explicit override
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an optional override path
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(Self::resolve_path(path)?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to an optional override path
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // The file holds a live access token; keep it private on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Check if the cached token is expired or will expire soon (within 5 minutes)
    pub fn is_token_expired(&self) -> bool {
        match &self.token {
            None => true,
            Some(token) => {
                let now = Utc::now();
                let buffer = chrono::Duration::minutes(5);
                token.expires_at - buffer < now
            }
        }
    }

    /// The start URL, or an error when it was never configured
    pub fn require_start_url(&self) -> Result<&str> {
        self.start_url
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::MissingStartUrl.into())
    }

    /// The configured region, falling back to the default
    pub fn region(&self) -> &str {
        self.sso_region.as_deref().unwrap_or(DEFAULT_SSO_REGION)
    }
}
