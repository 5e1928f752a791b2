//! Run artifact cleanup

use std::path::Path;

use autostore_common::Result;

/// Remove per-run artifacts under `root`: the persisted auth state and
/// the test-results directory. Idempotent; missing paths are fine.
pub fn cleanup_run_artifacts(root: &Path) -> Result<()> {
    let auth_dir = root.join(".auth");
    if auth_dir.exists() {
        std::fs::remove_dir_all(&auth_dir)?;
    }
    let results = root.join("test-results");
    if results.exists() {
        std::fs::remove_dir_all(&results)?;
    }
    Ok(())
}
