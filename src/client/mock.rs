//! Mock Identity Center client for testing
//!
//! Provides a scriptable implementation of [`SsoApi`] for unit testing
//! without making real API calls.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{
    AccountInfo, CreateTokenResponse, DeviceAuthorization, RoleCredentials, RoleInfo, SsoApi,
};
use crate::error::{ApiError, Result};

/// One scripted outcome for a `create_token` poll attempt
#[derive(Debug)]
pub enum TokenOutcome {
    Pending,
    SlowDown,
    Success(CreateTokenResponse),
    Fail(ApiError),
}

/// Mock API client for testing.
///
/// Configure responses via builder methods, then drive the code under test.
///
/// # Example
/// ```ignore
/// let mock = MockSsoClient::new()
///     .with_token_outcomes(vec![TokenOutcome::Pending, TokenOutcome::Success(...)])
///     .await;
/// ```
pub struct MockSsoClient {
    /// Device authorization returned by start_device_authorization
    device_auth: Arc<Mutex<DeviceAuthorization>>,
    /// Scripted outcomes consumed by successive create_token calls
    token_outcomes: Arc<Mutex<VecDeque<TokenOutcome>>>,
    /// Accounts returned by list_accounts
    accounts: Arc<Mutex<Vec<AccountInfo>>>,
    /// Roles per account ID
    roles: Arc<Mutex<HashMap<String, Vec<RoleInfo>>>>,
    /// Account IDs whose role listing fails
    failing_role_accounts: Arc<Mutex<Vec<String>>>,
    /// Credentials returned by get_role_credentials
    credentials: Arc<Mutex<Option<RoleCredentials>>>,
    /// Error to return on the next call (consumed on first use)
    error: Arc<Mutex<Option<ApiError>>>,
    /// Call counts for verification
    call_count: Arc<Mutex<CallCounts>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub start_device_authorization: usize,
    pub create_token: usize,
    pub list_accounts: usize,
    pub list_account_roles: usize,
    pub get_role_credentials: usize,
}

fn default_device_auth() -> DeviceAuthorization {
    DeviceAuthorization {
        device_code: "mock-device-code".to_string(),
        user_code: "ABCD-1234".to_string(),
        verification_uri: "https://device.sso.example.com/".to_string(),
        verification_uri_complete: Some(
            "https://device.sso.example.com/?user_code=ABCD-1234".to_string(),
        ),
        expires_in: 600,
        interval: Some(1),
    }
}

impl Default for MockSsoClient {
    fn default() -> Self {
        Self {
            device_auth: Arc::new(Mutex::new(default_device_auth())),
            token_outcomes: Arc::new(Mutex::new(VecDeque::new())),
            accounts: Arc::new(Mutex::new(Vec::new())),
            roles: Arc::new(Mutex::new(HashMap::new())),
            failing_role_accounts: Arc::new(Mutex::new(Vec::new())),
            credentials: Arc::new(Mutex::new(None)),
            error: Arc::new(Mutex::new(None)),
            call_count: Arc::new(Mutex::new(CallCounts::default())),
        }
    }
}

impl MockSsoClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the device authorization handshake result.
    pub async fn with_device_auth(self, auth: DeviceAuthorization) -> Self {
        *self.device_auth.lock().await = auth;
        self
    }

    /// Script the outcomes of successive create_token calls.
    pub async fn with_token_outcomes(self, outcomes: Vec<TokenOutcome>) -> Self {
        *self.token_outcomes.lock().await = outcomes.into();
        self
    }

    /// Configure accounts returned by list_accounts.
    pub async fn with_accounts(self, accounts: Vec<AccountInfo>) -> Self {
        *self.accounts.lock().await = accounts;
        self
    }

    /// Configure the roles for one account.
    pub async fn with_roles(self, account_id: &str, role_names: &[&str]) -> Self {
        let roles = role_names
            .iter()
            .map(|name| RoleInfo {
                role_name: name.to_string(),
                account_id: account_id.to_string(),
            })
            .collect();
        self.roles.lock().await.insert(account_id.to_string(), roles);
        self
    }

    /// Make role listing fail for one account.
    pub async fn with_failing_roles(self, account_id: &str) -> Self {
        self.failing_role_accounts
            .lock()
            .await
            .push(account_id.to_string());
        self
    }

    /// Configure credentials returned by get_role_credentials.
    pub async fn with_credentials(self, creds: RoleCredentials) -> Self {
        *self.credentials.lock().await = Some(creds);
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Check if there's a pending error and consume it.
    async fn check_error(&self) -> Result<()> {
        let mut error = self.error.lock().await;
        if let Some(e) = error.take() {
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl SsoApi for MockSsoClient {
    async fn start_device_authorization(&self, _start_url: &str) -> Result<DeviceAuthorization> {
        self.check_error().await?;

        let mut counts = self.call_count.lock().await;
        counts.start_device_authorization += 1;

        Ok(self.device_auth.lock().await.clone())
    }

    async fn create_token(&self, _device_code: &str) -> Result<CreateTokenResponse> {
        self.check_error().await?;

        let mut counts = self.call_count.lock().await;
        counts.create_token += 1;
        drop(counts);

        let outcome = self.token_outcomes.lock().await.pop_front();
        match outcome {
            Some(TokenOutcome::Pending) => Err(ApiError::AuthorizationPending.into()),
            Some(TokenOutcome::SlowDown) => Err(ApiError::SlowDown.into()),
            Some(TokenOutcome::Success(token)) => Ok(token),
            Some(TokenOutcome::Fail(err)) => Err(err.into()),
            // Unscripted calls succeed, so tests only script what they care about
            None => Ok(CreateTokenResponse {
                access_token: "mock-access-token".to_string(),
                expires_in: 3600,
            }),
        }
    }

    async fn list_accounts(&self, _access_token: &str) -> Result<Vec<AccountInfo>> {
        self.check_error().await?;

        let mut counts = self.call_count.lock().await;
        counts.list_accounts += 1;

        Ok(self.accounts.lock().await.clone())
    }

    async fn list_account_roles(
        &self,
        _access_token: &str,
        account_id: &str,
    ) -> Result<Vec<RoleInfo>> {
        self.check_error().await?;

        let mut counts = self.call_count.lock().await;
        counts.list_account_roles += 1;
        drop(counts);

        if self
            .failing_role_accounts
            .lock()
            .await
            .iter()
            .any(|id| id == account_id)
        {
            return Err(ApiError::Provider {
                code: "InternalServerException".to_string(),
                message: format!("Role listing failed for account {account_id}"),
            }
            .into());
        }

        Ok(self
            .roles
            .lock()
            .await
            .get(account_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_role_credentials(
        &self,
        _access_token: &str,
        account_id: &str,
        role_name: &str,
    ) -> Result<RoleCredentials> {
        self.check_error().await?;

        let mut counts = self.call_count.lock().await;
        counts.get_role_credentials += 1;
        drop(counts);

        let creds = self.credentials.lock().await;
        Ok(creds.clone().unwrap_or_else(|| RoleCredentials {
            access_key_id: format!("AKIA-{account_id}"),
            secret_access_key: "mock-secret".to_string(),
            session_token: format!("mock-session-{role_name}"),
            expiration: (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp_millis(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client_default_empty() {
        let mock = MockSsoClient::new();

        let accounts = mock.list_accounts("tok").await.unwrap();
        assert!(accounts.is_empty());

        let roles = mock.list_account_roles("tok", "111111111111").await.unwrap();
        assert!(roles.is_empty());
    }

    #[tokio::test]
    async fn test_mock_client_scripted_token_outcomes() {
        let mock = MockSsoClient::new()
            .with_token_outcomes(vec![
                TokenOutcome::Pending,
                TokenOutcome::Success(CreateTokenResponse {
                    access_token: "tok".to_string(),
                    expires_in: 600,
                }),
            ])
            .await;

        assert!(mock.create_token("d").await.is_err());
        let token = mock.create_token("d").await.unwrap();
        assert_eq!(token.access_token, "tok");

        let counts = mock.call_counts().await;
        assert_eq!(counts.create_token, 2);
    }

    #[tokio::test]
    async fn test_mock_client_with_error() {
        let mock = MockSsoClient::new()
            .with_error(ApiError::Unauthorized)
            .await;

        let result = mock.list_accounts("tok").await;
        assert!(result.is_err());

        // Error is consumed, next call succeeds
        let result = mock.list_accounts("tok").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_mock_client_roles_per_account() {
        let mock = MockSsoClient::new()
            .with_roles("111111111111", &["admin", "viewer"])
            .await;

        let roles = mock.list_account_roles("tok", "111111111111").await.unwrap();
        assert_eq!(roles.len(), 2);
        assert_eq!(roles[0].role_name, "admin");

        let none = mock.list_account_roles("tok", "999999999999").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_mock_client_failing_roles() {
        let mock = MockSsoClient::new()
            .with_failing_roles("222222222222")
            .await;

        let result = mock.list_account_roles("tok", "222222222222").await;
        assert!(result.is_err());
    }
}
