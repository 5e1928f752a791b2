//! Suite scenarios
//!
//! The storefront flows the suite drives. Each body logs through the
//! test-scoped logger and re-raises any failure unchanged after
//! recording it, so the runner's own pass/fail accounting is never
//! affected by the logging layer.

use std::future::Future;
use std::path::Path;

use autostore_common::{Error, Result};
use autostore_observer::Payload;
use futures::future::BoxFuture;
use futures::FutureExt;
use serde_json::json;

use crate::auth;
use crate::data;
use crate::harness::{Scenario, Session};
use crate::pages::{HomePage, LoginPage, RegistrationPage};

/// Every scenario in the suite, in declaration order
pub fn all() -> Vec<Scenario> {
    vec![register_new_user(), logged_in_state()]
}

pub fn register_new_user() -> Scenario {
    Scenario::new("should register a new user", file!(), line!(), register_body)
}

pub fn logged_in_state() -> Scenario {
    Scenario::new("should be logged in", file!(), line!(), account_body)
}

fn register_body(session: &Session) -> BoxFuture<'_, Result<()>> {
    async move { log_failure(session, "Registration test", run_registration(session)).await }
        .boxed()
}

fn account_body(session: &Session) -> BoxFuture<'_, Result<()>> {
    async move {
        log_failure(session, "Account verification test", run_account_check(session)).await
    }
    .boxed()
}

/// Registration flow: home -> login -> register, then persist and verify
/// the logged-in state.
async fn run_registration(session: &Session) -> Result<()> {
    let data = data::unique_registration_data();
    session.logger().info(
        "Generated registration data",
        Some(json!({
            "email": data.email,
            "username": data.login_name,
        })),
    )?;

    let home = HomePage::new(session);
    home.goto().await?;
    home.click_login_or_register().await?;

    let login = LoginPage::new(session);
    login.expect_login_page_visible().await?;
    login.continue_to_register().await?;

    let registration = RegistrationPage::new(session);
    registration.expect_registration_page_visible().await?;
    registration.fill_registration_form(&data).await?;

    // A successful registration leaves the session logged in; keep that
    // state for the rest of the run.
    auth::save_authentication_state(session, Path::new(auth::STORAGE_STATE_PATH)).await?;
    auth::verify_authentication_state(session).await?;

    session
        .logger()
        .info("Registration test completed successfully", None)?;
    Ok(())
}

/// Logged-in check: the account dashboard is reachable and shows the
/// signed-in landmarks.
async fn run_account_check(session: &Session) -> Result<()> {
    session
        .logger()
        .info("Starting account verification test", None)?;

    session
        .browser()
        .goto(&session.url("/index.php?rt=account/account"))
        .await?;

    session
        .step("verify account dashboard", "test.step", async {
            let heading = session.browser().inner_text("h1").await?;
            if !heading.contains("My Account") {
                return Err(Error::AssertionFailed(format!(
                    "expected My Account heading, saw {heading:?}"
                )));
            }
            if !session
                .browser()
                .is_visible("a:has-text(\"Account Dashboard\")")
                .await?
            {
                return Err(Error::AssertionFailed(
                    "Account Dashboard link not visible".into(),
                ));
            }
            Ok(())
        })
        .await?;

    session
        .logger()
        .info("Account verification test completed successfully", None)?;
    Ok(())
}

/// Record a failure before re-raising it unchanged. A failed failure
/// record must not replace the original error.
async fn log_failure(
    session: &Session,
    what: &str,
    fut: impl Future<Output = Result<()>>,
) -> Result<()> {
    match fut.await {
        Ok(()) => Ok(()),
        Err(e) => {
            session
                .logger()
                .error(&format!("{what} failed"), Some(Payload::from_error(&e)))
                .unwrap_or_else(|log_err| {
                    tracing::warn!(target: "autostore", "failure record not written: {log_err}");
                });
            Err(e)
        }
    }
}
