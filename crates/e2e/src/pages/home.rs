//! Storefront landing page

use autostore_common::Result;

use crate::harness::Session;

pub struct HomePage<'a> {
    session: &'a Session,
}

impl<'a> HomePage<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub async fn goto(&self) -> Result<()> {
        self.session
            .step("open home page", "pageobject", async {
                self.session.browser().goto(&self.session.url("/")).await
            })
            .await
    }

    pub async fn click_login_or_register(&self) -> Result<()> {
        self.session
            .step("click login or register", "pageobject", async {
                self.session
                    .browser()
                    .click("a:has-text(\"Login or register\")")
                    .await
            })
            .await
    }
}
