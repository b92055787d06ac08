//! AWS Identity Center API client
//!
//! The provider boundary is the [`SsoApi`] trait: the device-authorization
//! handshake and token creation (SSO-OIDC), plus account/role enumeration
//! and role-credential issuance (SSO portal). Wire shapes live here;
//! everything above this module works in terms of these records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod http;
#[cfg(test)]
pub mod mock;

pub use http::AwsSsoClient;
#[cfg(test)]
#[allow(unused_imports)]
pub use mock::MockSsoClient;

/// Identity Center API operations
#[async_trait]
pub trait SsoApi: Send + Sync {
    /// Begin the OAuth device-authorization handshake for a start URL
    async fn start_device_authorization(&self, start_url: &str) -> Result<DeviceAuthorization>;

    /// Attempt to redeem a device code for an access token.
    ///
    /// Fails with `ApiError::AuthorizationPending` until the user approves
    /// the request in the browser.
    async fn create_token(&self, device_code: &str) -> Result<CreateTokenResponse>;

    /// List all AWS accounts visible to an access token
    async fn list_accounts(&self, access_token: &str) -> Result<Vec<AccountInfo>>;

    /// List the roles the token can assume in one account
    async fn list_account_roles(
        &self,
        access_token: &str,
        account_id: &str,
    ) -> Result<Vec<RoleInfo>>;

    /// Exchange an (account, role) pair for temporary credentials
    async fn get_role_credentials(
        &self,
        access_token: &str,
        account_id: &str,
        role_name: &str,
    ) -> Result<RoleCredentials>;
}

/// Device-authorization handshake result.
///
/// Consumed exactly once by the token acquirer's poll loop.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceAuthorization {
    /// Opaque code the poll loop redeems for a token
    pub device_code: String,

    /// Short code the user confirms in the browser
    pub user_code: String,

    /// Verification page the user must visit
    pub verification_uri: String,

    /// Verification page with the user code pre-filled
    #[serde(default)]
    pub verification_uri_complete: Option<String>,

    /// Seconds until the device code expires
    pub expires_in: u64,

    /// Provider-suggested polling interval in seconds
    #[serde(default)]
    pub interval: Option<u64>,
}

/// Raw token-creation response from the OIDC endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTokenResponse {
    /// The opaque bearer token
    pub access_token: String,

    /// Token lifetime in seconds
    pub expires_in: u64,
}

/// An SSO access token with its computed absolute expiry
#[derive(Debug, Clone)]
pub struct SsoToken {
    /// The opaque bearer token
    pub access_token: String,

    /// Absolute expiry, computed when the token was obtained
    pub expires_at: DateTime<Utc>,
}

/// AWS account visible through the portal
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    /// 12-digit account ID
    pub account_id: String,

    /// Account display name
    pub account_name: String,

    /// Account owner email (not in all responses)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
}

/// Role assignable within an account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleInfo {
    /// Permission-set role name
    pub role_name: String,

    /// Account the role belongs to
    pub account_id: String,
}

/// Temporary credentials returned by the federation endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleCredentials {
    pub access_key_id: String,

    pub secret_access_key: String,

    pub session_token: String,

    /// Expiration as epoch milliseconds
    pub expiration: i64,
}
