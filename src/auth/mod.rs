//! Device-authorization token acquisition
//!
//! Runs the OAuth device flow against the OIDC endpoint: one
//! start-authorization call, one user-facing notification (browser
//! launch, code display), then a poll loop that redeems the device code
//! for an access token once the user approves the request.

use std::time::Duration;

use chrono::Utc;
use tokio::time::Instant;

use crate::client::{DeviceAuthorization, SsoApi, SsoToken};
use crate::error::{ApiError, Error, Result};

/// Fixed delay between poll attempts while authorization is pending
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Run the device-authorization flow and poll until a token is issued.
///
/// `notify` is invoked exactly once, after the handshake succeeds, so the
/// caller can show the user code and open the verification page. The poll
/// loop then retries `create_token` at a fixed interval while the
/// provider reports the authorization as pending, backing off by one
/// extra interval when asked to slow down. Any other provider error
/// aborts the loop and is surfaced unmodified.
///
/// The loop is bounded by the device code's own lifetime: once
/// `expires_in` elapses without approval, `AuthorizationExpired` is
/// returned rather than polling a dead code forever.
pub async fn acquire_token<C, F>(client: &C, start_url: &str, notify: F) -> Result<SsoToken>
where
    C: SsoApi + ?Sized,
    F: FnOnce(&DeviceAuthorization),
{
    let device = client.start_device_authorization(start_url).await?;
    log::debug!(
        "Device authorization started, code expires in {}s",
        device.expires_in
    );

    notify(&device);

    let deadline = Instant::now() + Duration::from_secs(device.expires_in);

    loop {
        match client.create_token(&device.device_code).await {
            Ok(response) => {
                let obtained_at = Utc::now();
                let expires_at =
                    obtained_at + chrono::Duration::seconds(response.expires_in as i64);
                log::info!("Access token obtained, valid until {expires_at}");

                return Ok(SsoToken {
                    access_token: response.access_token,
                    expires_at,
                });
            }
            Err(Error::Api(err)) if err.is_retryable() => {
                let wait = match err {
                    ApiError::SlowDown => POLL_INTERVAL * 2,
                    _ => POLL_INTERVAL,
                };

                if Instant::now() + wait >= deadline {
                    return Err(ApiError::AuthorizationExpired.into());
                }

                tokio::time::sleep(wait).await;
            }
            Err(err) => return Err(err),
        }
    }
}
