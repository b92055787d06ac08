//! AWS shared-credentials store
//!
//! Writes exchanged credentials into the shared credentials file under a
//! profile named by the record's `store_as`. Existing unrelated profiles
//! are preserved.

use std::env;
use std::path::PathBuf;

use ini::Ini;

use crate::error::{Error, Result};
use crate::flow::CredentialRecord;

/// Resolve the shared credentials file path.
/// Respects AWS_SHARED_CREDENTIALS_FILE when set.
pub fn credentials_path() -> Option<PathBuf> {
    if let Ok(path) = env::var("AWS_SHARED_CREDENTIALS_FILE") {
        return Some(PathBuf::from(path));
    }

    dirs::home_dir().map(|home| home.join(".aws").join("credentials"))
}

/// Save a credential record as a profile in the shared credentials file
pub fn save_profile(record: &CredentialRecord) -> Result<()> {
    let path = credentials_path().ok_or_else(|| {
        Error::CredentialStore("Could not determine AWS credentials path".to_string())
    })?;

    save_profile_to(record, path)
}

/// Save a credential record into a specific credentials file
pub fn save_profile_to(record: &CredentialRecord, path: PathBuf) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = path
        .exists()
        .then(|| Ini::load_from_file(&path).ok())
        .flatten()
        .unwrap_or_else(Ini::new);

    file.with_section(Some(record.store_as.as_str()))
        .set("aws_access_key_id", &record.access_key_id)
        .set("aws_secret_access_key", &record.secret_access_key)
        .set("aws_session_token", &record.session_token)
        .set("aws_session_expiration", record.expiration.to_rfc3339());

    file.write_to_file(&path)
        .map_err(|e| Error::CredentialStore(format!("Failed to write credentials file: {e}")))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(&path)?.permissions();
        perms.set_mode(0o600);
        std::fs::set_permissions(&path, perms)?;
    }

    log::info!(
        "Credentials for {}/{} saved to profile '{}'",
        record.account_id,
        record.role_name,
        record.store_as
    );

    Ok(())
}
