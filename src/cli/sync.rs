//! Sync command implementation
//!
//! Drives the full pipeline: session token → account/role stream →
//! per-record credential exchange → shared-credentials profiles. Each
//! record is fully handled before the next is pulled.

use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm};
use futures::{pin_mut, StreamExt};

use crate::cli::args::{FilterArgs, GlobalOptions};
use crate::cli::context::CommandContext;
use crate::credentials;
use crate::error::{Error, Result};
use crate::flow::{self, ExchangeRequest, NameFilters};

/// Run the sync command
pub async fn run(
    opts: &GlobalOptions,
    filter_args: &FilterArgs,
    dry_run: bool,
    yes: bool,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let token = ctx.require_token()?;

    let filters = NameFilters::new(filter_args.patterns(&ctx.config.preferences.name_filters))?;
    let region = ctx.config.region();

    let stream = flow::account_roles(&ctx.client, &token.access_token, region, &filters);
    pin_mut!(stream);

    let mut saved = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;
    let mut first_error: Option<Error> = None;

    while let Some(item) = stream.next().await {
        let record = match item {
            Ok(record) => record,
            Err(err) => {
                // Enumeration failure is fatal to the rest of the
                // sequence; what was already exchanged stands.
                print_summary(saved, skipped, failed);
                return Err(err);
            }
        };

        if !filter_args.role_matches(&record.role_name) {
            continue;
        }

        let confirm = if dry_run {
            false
        } else if yes {
            true
        } else {
            Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(format!(
                    "Exchange {} / {}?",
                    record.account_name, record.role_name
                ))
                .default(true)
                .interact()?
        };

        let request = ExchangeRequest {
            account_id: &record.account_id,
            role_name: &record.role_name,
            account_name: Some(&record.account_name),
        };

        match flow::exchange_credential(&ctx.client, &token.access_token, &request, confirm).await
        {
            Ok(Some(credential)) => match credentials::save_profile(&credential) {
                Ok(()) => {
                    println!(
                        "{} {} / {} → profile '{}' ({})",
                        "✓".green(),
                        record.account_name,
                        record.role_name,
                        credential.store_as.bold(),
                        credential.expiry_note()
                    );
                    saved += 1;
                }
                Err(err) => {
                    eprintln!(
                        "{} {} / {}: {}",
                        "✗".red(),
                        record.account_name,
                        record.role_name,
                        err
                    );
                    failed += 1;
                    first_error.get_or_insert(err);
                }
            },
            Ok(None) => {
                if dry_run {
                    println!(
                        "{} would exchange {} / {} → profile '{}'",
                        "·".dimmed(),
                        record.account_name,
                        record.role_name,
                        record.account_name
                    );
                } else {
                    println!(
                        "{} skipped {} / {}",
                        "·".dimmed(),
                        record.account_name,
                        record.role_name
                    );
                }
                skipped += 1;
            }
            // One failed exchange does not stop the records behind it
            Err(err) => {
                eprintln!(
                    "{} {} / {}: {}",
                    "✗".red(),
                    record.account_name,
                    record.role_name,
                    err
                );
                failed += 1;
                first_error.get_or_insert(err);
            }
        }
    }

    print_summary(saved, skipped, failed);

    match first_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn print_summary(saved: usize, skipped: usize, failed: usize) {
    println!();
    let mut parts = vec![format!("{saved} saved")];
    if skipped > 0 {
        parts.push(format!("{skipped} skipped"));
    }
    if failed > 0 {
        parts.push(format!("{failed} failed"));
    }
    println!("{} {}", "Profiles:".bold(), parts.join(", "));
}
