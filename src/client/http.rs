//! HTTP implementation of the Identity Center API client
//!
//! Talks to two regional endpoints: the SSO-OIDC service for the device
//! flow (`oidc.{region}.amazonaws.com`) and the SSO portal for account,
//! role, and credential queries (`portal.sso.{region}.amazonaws.com`).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;

use super::{
    AccountInfo, CreateTokenResponse, DeviceAuthorization, RoleCredentials, RoleInfo, SsoApi,
};
use crate::error::{ApiError, Result};

/// Client name sent during OIDC dynamic registration
const CLIENT_NAME: &str = "ssokey";

/// OAuth grant type for the device-authorization flow
const DEVICE_CODE_GRANT: &str = "urn:ietf:params:oauth:grant-type:device_code";

/// Page size for portal listing calls
const MAX_RESULT: u32 = 100;

/// Identity Center API client
pub struct AwsSsoClient {
    http: HttpClient,
    oidc_base: String,
    portal_base: String,
    registration: RwLock<Option<ClientRegistration>>,
}

/// OIDC dynamic-registration result, reused across calls
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClientRegistration {
    client_id: String,
    client_secret: String,
}

/// Error body returned by both the OIDC and portal services
#[derive(Debug, Deserialize)]
struct ServiceError {
    #[serde(default, alias = "__type")]
    error: Option<String>,
    #[serde(default, alias = "message")]
    error_description: Option<String>,
}

impl AwsSsoClient {
    /// Create a client for the given Identity Center region
    pub fn new(region: &str) -> Result<Self> {
        Self::with_endpoints(
            format!("https://oidc.{region}.amazonaws.com"),
            format!("https://portal.sso.{region}.amazonaws.com"),
        )
    }

    /// Create a client against explicit endpoints (tests, local stubs)
    pub fn with_endpoints(oidc_base: String, portal_base: String) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            oidc_base,
            portal_base,
            registration: RwLock::new(None),
        })
    }

    /// Get the cached client registration, registering on first use
    async fn registration(&self) -> Result<ClientRegistration> {
        if let Some(reg) = self.registration.read().await.clone() {
            return Ok(reg);
        }

        let url = format!("{}/client/register", self.oidc_base);
        let response = self
            .http
            .post(&url)
            .json(&json!({
                "clientName": CLIENT_NAME,
                "clientType": "public",
            }))
            .send()
            .await
            .map_err(ApiError::from)?;

        let reg: ClientRegistration = Self::parse_oidc_response(response).await?;

        let mut cached = self.registration.write().await;
        *cached = Some(reg.clone());
        log::debug!("Registered OIDC client {}", reg.client_id);

        Ok(reg)
    }

    /// Decode an OIDC response, mapping the wire error codes
    async fn parse_oidc_response<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let body = response.text().await.map_err(ApiError::from)?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| {
                ApiError::InvalidResponse(format!("Failed to parse response: {e}")).into()
            });
        }

        let err: ServiceError = serde_json::from_str(&body).unwrap_or(ServiceError {
            error: None,
            error_description: None,
        });

        Err(match err.error.as_deref() {
            Some("authorization_pending") => ApiError::AuthorizationPending,
            Some("slow_down") => ApiError::SlowDown,
            Some("expired_token") => ApiError::AuthorizationExpired,
            Some("access_denied") => ApiError::AccessDenied,
            Some(code) => ApiError::Provider {
                code: code.to_string(),
                message: err.error_description.unwrap_or_else(|| body.clone()),
            },
            None => ApiError::InvalidResponse(format!("HTTP {status}: {body}")),
        }
        .into())
    }

    /// Make an authenticated portal GET request
    async fn portal_get<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        access_token: &str,
    ) -> Result<T> {
        let url = format!("{}{}", self.portal_base, path);
        let response = self
            .http
            .get(&url)
            .query(query)
            .header("x-amz-sso_bearer_token", access_token)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        let body = response.text().await.map_err(ApiError::from)?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| {
                ApiError::InvalidResponse(format!("Failed to parse response: {e}")).into()
            });
        }

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized.into());
        }

        let err: ServiceError = serde_json::from_str(&body).unwrap_or(ServiceError {
            error: None,
            error_description: None,
        });

        Err(ApiError::Provider {
            code: err.error.unwrap_or_else(|| status.to_string()),
            message: err.error_description.unwrap_or(body),
        }
        .into())
    }
}

#[async_trait]
impl SsoApi for AwsSsoClient {
    async fn start_device_authorization(&self, start_url: &str) -> Result<DeviceAuthorization> {
        let reg = self.registration().await?;

        let url = format!("{}/device_authorization", self.oidc_base);
        let response = self
            .http
            .post(&url)
            .json(&json!({
                "clientId": reg.client_id,
                "clientSecret": reg.client_secret,
                "startUrl": start_url,
            }))
            .send()
            .await
            .map_err(ApiError::from)?;

        Self::parse_oidc_response(response).await
    }

    async fn create_token(&self, device_code: &str) -> Result<CreateTokenResponse> {
        let reg = self.registration().await?;

        let url = format!("{}/token", self.oidc_base);
        let response = self
            .http
            .post(&url)
            .json(&json!({
                "clientId": reg.client_id,
                "clientSecret": reg.client_secret,
                "grantType": DEVICE_CODE_GRANT,
                "deviceCode": device_code,
            }))
            .send()
            .await
            .map_err(ApiError::from)?;

        Self::parse_oidc_response(response).await
    }

    async fn list_accounts(&self, access_token: &str) -> Result<Vec<AccountInfo>> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct AccountsResponse {
            account_list: Vec<AccountInfo>,
            #[serde(default)]
            next_token: Option<String>,
        }

        let max_result = MAX_RESULT.to_string();
        let mut accounts = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut query: Vec<(&str, &str)> = vec![("max_result", &max_result)];
            if let Some(ref token) = next_token {
                query.push(("next_token", token));
            }

            let page: AccountsResponse = self
                .portal_get("/assignment/accounts", &query, access_token)
                .await?;

            accounts.extend(page.account_list);
            next_token = page.next_token;

            if next_token.is_none() {
                break;
            }
        }

        Ok(accounts)
    }

    async fn list_account_roles(
        &self,
        access_token: &str,
        account_id: &str,
    ) -> Result<Vec<RoleInfo>> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct RolesResponse {
            role_list: Vec<RoleInfo>,
            #[serde(default)]
            next_token: Option<String>,
        }

        let max_result = MAX_RESULT.to_string();
        let mut roles = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut query: Vec<(&str, &str)> =
                vec![("account_id", account_id), ("max_result", &max_result)];
            if let Some(ref token) = next_token {
                query.push(("next_token", token));
            }

            let page: RolesResponse = self
                .portal_get("/assignment/roles", &query, access_token)
                .await?;

            roles.extend(page.role_list);
            next_token = page.next_token;

            if next_token.is_none() {
                break;
            }
        }

        Ok(roles)
    }

    async fn get_role_credentials(
        &self,
        access_token: &str,
        account_id: &str,
        role_name: &str,
    ) -> Result<RoleCredentials> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct CredentialsResponse {
            role_credentials: RoleCredentials,
        }

        let response: CredentialsResponse = self
            .portal_get(
                "/federation/credentials",
                &[("account_id", account_id), ("role_name", role_name)],
                access_token,
            )
            .await?;

        Ok(response.role_credentials)
    }
}
