//! Login-state capture and verification

use std::path::Path;

use autostore_common::{Error, Result};
use serde_json::json;

use crate::harness::Session;

/// Where the registration flow persists the logged-in storage state for
/// the rest of the run.
pub const STORAGE_STATE_PATH: &str = ".auth/user.json";

/// Confirm the session is logged in by opening the account page and
/// checking for the customer menu. Fails loudly; a run that silently
/// continues logged out produces misleading results for every later
/// scenario.
pub async fn verify_authentication_state(session: &Session) -> Result<()> {
    session
        .logger()
        .debug("Verifying authentication state", None)?;
    session
        .browser()
        .goto(&session.url("/index.php?rt=account/account"))
        .await?;
    if !session.browser().is_visible("#customer_menu_top").await? {
        session
            .logger()
            .warn("Authentication state verification failed", None)?;
        return Err(Error::AuthVerification);
    }
    Ok(())
}

/// Persist cookies and local storage to `path`
pub async fn save_authentication_state(session: &Session, path: &Path) -> Result<()> {
    session.logger().debug(
        "Saving authentication state",
        Some(json!({"path": path.display().to_string()})),
    )?;
    session.browser().save_storage_state(path).await
}
