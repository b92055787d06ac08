//! Login command implementation

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::auth;
use crate::browser;
use crate::cli::args::GlobalOptions;
use crate::cli::context::CommandContext;
use crate::error::Result;

/// Run the login command
pub async fn run(opts: &GlobalOptions, force: bool) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;
    let start_url = ctx.config.require_start_url()?.to_string();

    if !force {
        if let Some(token) = &ctx.token {
            let remaining = token.expires_at.signed_duration_since(chrono::Utc::now());
            println!(
                "{} Already signed in (token valid for {}h {}m). Use --force to sign in again.",
                "✓".green(),
                remaining.num_hours(),
                remaining.num_minutes() % 60
            );
            return Ok(());
        }
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .expect("static spinner template is valid"),
    );
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message("Waiting for browser authorization...");

    let token = auth::acquire_token(&ctx.client, &start_url, |device| {
        spinner.suspend(|| {
            println!("{}", "Confirm this code in your browser:".bold());
            println!("\n    {}\n", device.user_code.bold().cyan());
            println!("Verification page: {}", device.verification_uri);
        });
        browser::open_verification_page(device);
    })
    .await;

    spinner.finish_and_clear();
    let token = token?;

    let remaining = token.expires_at.signed_duration_since(chrono::Utc::now());
    ctx.publish_token(token, opts.config_ref())?;

    println!("{}", "✓ Login successful!".green());
    println!(
        "  Token valid for {}h {}m",
        remaining.num_hours(),
        remaining.num_minutes() % 60
    );

    Ok(())
}
