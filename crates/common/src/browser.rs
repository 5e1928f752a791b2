//! Browser driver interface
//!
//! The browser-automation driver is an external collaborator; the suite
//! only depends on this trait. Page objects issue selector-addressed
//! operations and never talk to a concrete driver directly.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

/// Operations the page objects need from a browser session.
///
/// Selectors are driver-interpreted strings: CSS plus the driver's text
/// extensions (`text=` exact match, `:has-text(...)`), the locator forms
/// the storefront pages rely on.
#[async_trait]
pub trait Browser: Send + Sync {
    /// Navigate to a URL. Relative URLs resolve against the session's
    /// base URL.
    async fn goto(&self, url: &str) -> Result<()>;

    async fn click(&self, selector: &str) -> Result<()>;

    async fn fill(&self, selector: &str, value: &str) -> Result<()>;

    async fn select_option(&self, selector: &str, value: &str) -> Result<()>;

    /// Check a checkbox (no-op if already checked)
    async fn check(&self, selector: &str) -> Result<()>;

    async fn is_visible(&self, selector: &str) -> Result<bool>;

    async fn inner_text(&self, selector: &str) -> Result<String>;

    /// Persist cookies and local storage so a later session can resume
    /// logged in.
    async fn save_storage_state(&self, path: &Path) -> Result<()>;
}
