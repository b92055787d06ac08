//! Role-credential exchange
//!
//! One provider call per (account, role) record, behind a confirm gate.
//! A declined record produces no call and no credential; a failed record
//! surfaces its own error without affecting any other record.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use crate::client::SsoApi;
use crate::error::{ApiError, ConfigError, Result};

/// Inputs for one credential exchange
#[derive(Debug, Clone)]
pub struct ExchangeRequest<'a> {
    pub account_id: &'a str,
    pub role_name: &'a str,
    /// Account display name; used as the profile name when present
    pub account_name: Option<&'a str>,
}

/// A set of temporary credentials ready for the credential store
#[derive(Debug, Clone, Serialize)]
pub struct CredentialRecord {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,

    /// Profile name the credentials should be stored under
    pub store_as: String,

    /// Absolute credential expiry
    pub expiration: DateTime<Utc>,

    /// Account the credentials belong to
    pub account_id: String,

    /// Role the credentials were issued for
    pub role_name: String,
}

impl CredentialRecord {
    /// Human-readable expiry: absolute local time plus remaining duration
    pub fn expiry_note(&self) -> String {
        let local = self.expiration.with_timezone(&Local);
        let remaining = self.expiration.signed_duration_since(Utc::now());
        format!(
            "expires at {} ({} remaining)",
            local.format("%Y-%m-%d %H:%M:%S %Z"),
            format_remaining(remaining)
        )
    }
}

fn format_remaining(duration: chrono::Duration) -> String {
    if duration.num_seconds() <= 0 {
        return "already expired".to_string();
    }

    let hours = duration.num_hours();
    let mins = duration.num_minutes() % 60;
    if hours > 0 {
        format!("{hours}h {mins}m")
    } else {
        format!("{mins}m")
    }
}

/// Exchange one (account, role) pair for temporary credentials.
///
/// `confirm == false` is the dry-run gate: no provider call is made and
/// no record is produced. The profile name falls back from the account
/// display name to the account ID.
pub async fn exchange_credential<C>(
    client: &C,
    access_token: &str,
    request: &ExchangeRequest<'_>,
    confirm: bool,
) -> Result<Option<CredentialRecord>>
where
    C: SsoApi + ?Sized,
{
    if request.account_id.is_empty() {
        return Err(ConfigError::Invalid("account_id must not be empty".to_string()).into());
    }
    if request.role_name.is_empty() {
        return Err(ConfigError::Invalid("role_name must not be empty".to_string()).into());
    }

    if !confirm {
        log::debug!(
            "Skipping credential exchange for {}/{} (not confirmed)",
            request.account_id,
            request.role_name
        );
        return Ok(None);
    }

    let credentials = client
        .get_role_credentials(access_token, request.account_id, request.role_name)
        .await?;

    let expiration = DateTime::from_timestamp_millis(credentials.expiration).ok_or_else(|| {
        ApiError::InvalidResponse(format!(
            "Invalid credential expiration timestamp: {}",
            credentials.expiration
        ))
    })?;

    let store_as = request
        .account_name
        .filter(|name| !name.is_empty())
        .unwrap_or(request.account_id)
        .to_string();

    let record = CredentialRecord {
        access_key_id: credentials.access_key_id,
        secret_access_key: credentials.secret_access_key,
        session_token: credentials.session_token,
        store_as,
        expiration,
        account_id: request.account_id.to_string(),
        role_name: request.role_name.to_string(),
    };

    log::info!(
        "Credentials for {}/{} {}",
        record.account_id,
        record.role_name,
        record.expiry_note()
    );

    Ok(Some(record))
}
