//! Browser launch for the device verification step

use crate::client::DeviceAuthorization;

/// Open the verification page once, fire-and-forget.
///
/// Prefers the pre-filled URI so the user does not have to type the
/// code. Failure to launch is only a warning; the user can always open
/// the printed URL manually.
pub fn open_verification_page(device: &DeviceAuthorization) {
    let uri = device
        .verification_uri_complete
        .as_deref()
        .unwrap_or(&device.verification_uri);

    if let Err(err) = open::that(uri) {
        log::warn!("Failed to open browser: {err}");
    }
}
