//! Autostore E2E Suite
//!
//! Browser test suite for the Automation Test Store storefront. The
//! browser driver itself is external; everything here talks to it
//! through the `Browser` trait.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Scenario Harness                        │
//! │    ├── worker tasks pull scenarios from a shared queue      │
//! │    ├── lifecycle events funnel to the reporter set          │
//! │    └── TestLogger brackets every test body                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Scenario (title + async body over a Session)               │
//! │    ├── pages: HomePage / LoginPage / RegistrationPage       │
//! │    ├── auth: logged-in-state capture and verification       │
//! │    └── data: sample users, run-unique email/login           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Browser trait (external driver)   StubBrowser (hermetic)   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod data;
pub mod fixtures;
pub mod harness;
pub mod pages;
pub mod scenarios;
pub mod stub;

pub use harness::{Harness, HarnessConfig, RunSummary, Scenario, Session};
pub use stub::StubBrowser;
