//! Account login page

use autostore_common::{Error, Result};

use crate::harness::Session;

pub struct LoginPage<'a> {
    session: &'a Session,
}

impl<'a> LoginPage<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub async fn expect_login_page_visible(&self) -> Result<()> {
        self.session
            .step("verify login page visible", "pageobject", async {
                if !self
                    .session
                    .browser()
                    .is_visible("text=Account Login")
                    .await?
                {
                    return Err(Error::AssertionFailed(
                        "Account Login heading not visible".into(),
                    ));
                }
                Ok(())
            })
            .await
    }

    /// The "I am a new customer" column's Continue button, leading to
    /// the registration form.
    pub async fn continue_to_register(&self) -> Result<()> {
        self.session
            .step("continue to registration", "pageobject", async {
                self.session
                    .browser()
                    .click("#accountFrm button:has-text(\"Continue\")")
                    .await
            })
            .await
    }
}
