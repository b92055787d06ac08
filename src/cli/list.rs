//! List command implementation

use futures::{pin_mut, StreamExt};
use tabled::Tabled;

use crate::cli::args::{FilterArgs, GlobalOptions, OutputFormat};
use crate::cli::context::CommandContext;
use crate::error::Result;
use crate::flow::{self, AccountRoleRecord, NameFilters};
use crate::output::{json, table};

/// Account/role pair for table display
#[derive(Tabled)]
struct AccountRoleDisplay {
    #[tabled(rename = "ACCOUNT ID")]
    account_id: String,
    #[tabled(rename = "ACCOUNT NAME")]
    account_name: String,
    #[tabled(rename = "ROLE")]
    role_name: String,
    #[tabled(rename = "REGION")]
    region: String,
}

impl From<&AccountRoleRecord> for AccountRoleDisplay {
    fn from(record: &AccountRoleRecord) -> Self {
        Self {
            account_id: record.account_id.clone(),
            account_name: record.account_name.clone(),
            role_name: record.role_name.clone(),
            region: record.region.clone(),
        }
    }
}

/// Run the list command
pub async fn run(opts: &GlobalOptions, filter_args: &FilterArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let token = ctx.require_token()?;

    let filters = NameFilters::new(filter_args.patterns(&ctx.config.preferences.name_filters))?;
    let region = ctx.config.region();

    let stream = flow::account_roles(&ctx.client, &token.access_token, region, &filters);
    pin_mut!(stream);

    let mut records: Vec<AccountRoleRecord> = Vec::new();
    let mut failure = None;

    while let Some(item) = stream.next().await {
        match item {
            Ok(record) if filter_args.role_matches(&record.role_name) => records.push(record),
            Ok(_) => (),
            Err(err) => {
                // Records gathered before the failure are still shown
                failure = Some(err);
                break;
            }
        }
    }

    match ctx.format {
        OutputFormat::Table => {
            let rows: Vec<AccountRoleDisplay> =
                records.iter().map(AccountRoleDisplay::from).collect();
            println!("{}", table::format_table(&rows));
        }
        OutputFormat::Json => {
            println!("{}", json::format_json(&records)?);
        }
    }

    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
