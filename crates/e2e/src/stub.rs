//! Scripted browser stand-in
//!
//! In-memory `Browser` for hermetic suite runs: records every operation
//! and answers element queries from a programmable script. Unscripted
//! selectors read as visible, so the happy path needs no setup.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use autostore_common::{Browser, Error, Result};
use parking_lot::Mutex;

/// One recorded driver operation, in call order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserOp {
    Goto(String),
    Click(String),
    Fill(String, String),
    SelectOption(String, String),
    Check(String),
    SaveStorageState(PathBuf),
}

#[derive(Default)]
pub struct StubBrowser {
    visible: Mutex<HashMap<String, bool>>,
    texts: Mutex<HashMap<String, String>>,
    ops: Mutex<Vec<BrowserOp>>,
}

impl StubBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the visibility answer for a selector
    pub fn set_visible(&self, selector: &str, visible: bool) {
        self.visible.lock().insert(selector.into(), visible);
    }

    /// Script the text content for a selector
    pub fn set_text(&self, selector: &str, text: &str) {
        self.texts.lock().insert(selector.into(), text.into());
    }

    /// Every operation the suite issued, in order
    pub fn operations(&self) -> Vec<BrowserOp> {
        self.ops.lock().clone()
    }

    fn record(&self, op: BrowserOp) {
        self.ops.lock().push(op);
    }
}

#[async_trait]
impl Browser for StubBrowser {
    async fn goto(&self, url: &str) -> Result<()> {
        self.record(BrowserOp::Goto(url.into()));
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.record(BrowserOp::Click(selector.into()));
        Ok(())
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<()> {
        self.record(BrowserOp::Fill(selector.into(), value.into()));
        Ok(())
    }

    async fn select_option(&self, selector: &str, value: &str) -> Result<()> {
        self.record(BrowserOp::SelectOption(selector.into(), value.into()));
        Ok(())
    }

    async fn check(&self, selector: &str) -> Result<()> {
        self.record(BrowserOp::Check(selector.into()));
        Ok(())
    }

    async fn is_visible(&self, selector: &str) -> Result<bool> {
        Ok(*self.visible.lock().get(selector).unwrap_or(&true))
    }

    async fn inner_text(&self, selector: &str) -> Result<String> {
        self.texts
            .lock()
            .get(selector)
            .cloned()
            .ok_or_else(|| Error::Browser(format!("no text scripted for {selector}")))
    }

    async fn save_storage_state(&self, path: &Path) -> Result<()> {
        self.record(BrowserOp::SaveStorageState(path.to_path_buf()));
        Ok(())
    }
}
