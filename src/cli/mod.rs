//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod context;
pub mod init;
pub mod list;
pub mod login;
pub mod status;
pub mod sync;

pub use args::{FilterArgs, GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// ssokey - CLI companion for AWS IAM Identity Center
#[derive(Parser, Debug)]
#[command(name = "ssokey")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "SSOKEY_FORMAT",
        default_value = "table",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "SSOKEY_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "SSOKEY_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize ssokey configuration
    Init,

    /// Sign in through the device-authorization flow
    Login {
        /// Re-run the flow even when a cached token is still valid
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// List accounts and roles reachable with the current token
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Exchange roles for temporary credentials and save them as profiles
    #[command(after_help = "EXAMPLES:\n  \
        ssokey sync                      # Confirm each account/role interactively\n  \
        ssokey sync --yes                # Exchange everything without prompting\n  \
        ssokey sync --filter 'prod-*'    # Only accounts matching the glob\n  \
        ssokey sync --role AdminAccess   # Only one role name\n  \
        ssokey sync --dry-run            # Show what would be exchanged")]
    Sync {
        #[command(flatten)]
        filters: FilterArgs,

        /// Preview without exchanging anything
        #[arg(long, short = 'n')]
        dry_run: bool,

        /// Exchange all matching roles without prompting
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Show authentication and configuration status
    Status,

    /// Display version information
    Version,

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
