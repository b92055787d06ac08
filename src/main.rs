//! ssokey CLI - companion for AWS IAM Identity Center

use clap::{CommandFactory, Parser};

mod auth;
mod browser;
mod cli;
mod client;
mod config;
mod credentials;
mod error;
mod flow;
mod output;

use cli::{Cli, Commands, GlobalOptions};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Login { force } => cli::login::run(&opts, force).await,
        Commands::List { filters } => cli::list::run(&opts, &filters).await,
        Commands::Sync {
            filters,
            dry_run,
            yes,
        } => cli::sync::run(&opts, &filters, dry_run, yes).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("ssokey version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "ssokey", &mut std::io::stdout());
            Ok(())
        }
    }
}
