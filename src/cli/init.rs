//! Init command implementation

use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input};

use crate::cli::args::GlobalOptions;
use crate::config::{Config, DEFAULT_SSO_REGION};
use crate::error::Result;

/// Run the init command
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to ssokey!".bold().green());
    println!("Let's set up your Identity Center configuration.\n");

    let start_url: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Identity Center start URL")
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            if input.starts_with("https://") {
                Ok(())
            } else {
                Err("The start URL must begin with https://")
            }
        })
        .interact_text()?;

    let sso_region: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Identity Center region")
        .default(DEFAULT_SSO_REGION.to_string())
        .interact_text()?;

    // Keep any cached token and preferences from an earlier setup
    let mut config = Config::load_at(opts.config_ref()).unwrap_or_default();
    config.start_url = Some(start_url.trim().to_string());
    config.sso_region = Some(sso_region.trim().to_string());
    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Sign in through your browser", "ssokey login".cyan());
    println!("  {} - List your accounts and roles", "ssokey list".cyan());

    Ok(())
}
