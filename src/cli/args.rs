//! Shared CLI argument types

use crate::cli::Cli;

/// Output format options
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format - one row per entry (default)
    #[default]
    Table,
    /// JSON format - structured for scripts
    Json,
}

/// Record filters shared by `list` and `sync`
#[derive(Debug, Clone, clap::Args, Default)]
pub struct FilterArgs {
    /// Account-name glob patterns (repeatable); defaults to the
    /// configured filters, or everything
    #[arg(long = "filter", short = 'F', value_name = "GLOB")]
    pub filters: Vec<String>,

    /// Restrict to one role name
    #[arg(long, short = 'r')]
    pub role: Option<String>,
}

impl FilterArgs {
    /// The effective patterns: CLI flags win over configured defaults
    pub fn patterns<'a>(&'a self, configured: &'a [String]) -> &'a [String] {
        if self.filters.is_empty() {
            configured
        } else {
            &self.filters
        }
    }

    /// Whether a role name passes the --role restriction
    pub fn role_matches(&self, role_name: &str) -> bool {
        match &self.role {
            None => true,
            Some(role) => role == role_name,
        }
    }
}

/// Global CLI options passed to all command handlers
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format (table, json)
    pub format: OutputFormat,

    /// Custom config file path (defaults to ~/.ssokey/config.yaml)
    pub config: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }
}
