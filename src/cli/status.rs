//! Status command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "ssokey Configuration Status".bold());

    let config_result = Config::load_at(opts.config_ref());

    match config_result {
        Ok(config) => {
            let config_path = Config::resolve_path(opts.config_ref())?;
            println!("Config file: {}", config_path.display().to_string().cyan());
            println!();

            // Start URL
            match &config.start_url {
                Some(url) => println!("{} Start URL: {}", "✓".green(), url),
                None => {
                    println!("{} Start URL not configured", "✗".red());
                    println!("  → Run 'ssokey init' to configure");
                }
            }

            println!("Region: {}", config.region());

            if !config.preferences.name_filters.is_empty() {
                println!(
                    "Account filters: {}",
                    config.preferences.name_filters.join(", ")
                );
            }

            // Token status
            match &config.token {
                Some(token) => {
                    if config.is_token_expired() {
                        println!(
                            "{} Access token expired (run 'ssokey login' to sign in again)",
                            "⚠".yellow()
                        );
                    } else {
                        let now = chrono::Utc::now();
                        let remaining = token.expires_at.signed_duration_since(now);
                        let hours = remaining.num_hours();
                        let mins = remaining.num_minutes() % 60;

                        println!(
                            "{} Access token valid (expires in {}h {}m)",
                            "✓".green(),
                            hours,
                            mins
                        );
                    }
                }
                None => {
                    println!("{} Not signed in", "✗".red());
                    println!("  → Run 'ssokey login' to sign in");
                }
            }
        }
        Err(err) => {
            println!("{} {}", "✗".red(), err);
        }
    }

    Ok(())
}
