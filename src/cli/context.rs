//! Command execution context
//!
//! Carries the loaded configuration, the API client, and the session's
//! current access token. The token travels here explicitly instead of in
//! any process-wide state: commands pass it to the pipeline stages they
//! invoke.

use crate::cli::args::{GlobalOptions, OutputFormat};
use crate::client::{AwsSsoClient, SsoToken};
use crate::config::{CachedToken, Config};
use crate::error::{ConfigError, Result};

/// Context for command execution containing config, client, and the
/// optional session token.
pub struct CommandContext {
    /// Loaded configuration
    pub config: Config,
    /// Identity Center API client for the configured region
    pub client: AwsSsoClient,
    /// Output format preference
    pub format: OutputFormat,
    /// Current access token, when a cached one is still valid
    pub token: Option<SsoToken>,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// Loads config from the override path (or default location), builds
    /// the client for the configured region, and picks up the cached
    /// token when it has not expired. It does not run any authentication
    /// itself; `ssokey login` is the only place the device flow starts.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_at(opts.config_ref())?;
        let client = AwsSsoClient::new(config.region())?;

        let token = if config.is_token_expired() {
            None
        } else {
            config.token.as_ref().map(|cached| SsoToken {
                access_token: cached.access_token.clone(),
                expires_at: cached.expires_at,
            })
        };

        Ok(Self {
            config,
            client,
            format: opts.format,
            token,
        })
    }

    /// The session token, or an error telling the user to log in.
    pub fn require_token(&self) -> Result<&SsoToken> {
        self.token
            .as_ref()
            .ok_or_else(|| ConfigError::MissingToken.into())
    }

    /// Publish a freshly acquired token: set it on the context and
    /// persist it to the config file for later runs.
    pub fn publish_token(&mut self, token: SsoToken, config_path: Option<&str>) -> Result<()> {
        self.config.token = Some(CachedToken {
            access_token: token.access_token.clone(),
            expires_at: token.expires_at,
        });
        self.config.save_at(config_path)?;
        self.token = Some(token);
        Ok(())
    }
}
