//! Account registration page

use autostore_common::{Error, Result};

use crate::harness::Session;

/// Zone options only load after the country is chosen
const COUNTRY_UNITED_STATES: &str = "223";

/// Everything the registration form asks for
#[derive(Debug, Clone)]
pub struct RegistrationData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub telephone: String,
    pub company: String,
    pub address1: String,
    pub city: String,
    pub zone_id: String,
    pub postcode: String,
    pub login_name: String,
    pub password: String,
}

pub struct RegistrationPage<'a> {
    session: &'a Session,
}

impl<'a> RegistrationPage<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub async fn expect_registration_page_visible(&self) -> Result<()> {
        self.session
            .step("verify registration page visible", "pageobject", async {
                if !self
                    .session
                    .browser()
                    .is_visible("#accountFrm >> text=Register Account")
                    .await?
                {
                    return Err(Error::AssertionFailed(
                        "Register Account heading not visible".into(),
                    ));
                }
                Ok(())
            })
            .await
    }

    pub async fn fill_registration_form(&self, data: &RegistrationData) -> Result<()> {
        self.session
            .step("fill registration form", "pageobject", async {
                let browser = self.session.browser();

                // Personal details
                browser.fill("#AccountFrm_firstname", &data.first_name).await?;
                browser.fill("#AccountFrm_lastname", &data.last_name).await?;
                browser.fill("#AccountFrm_email", &data.email).await?;
                browser.fill("#AccountFrm_telephone", &data.telephone).await?;

                // Address
                browser.fill("#AccountFrm_company", &data.company).await?;
                browser.fill("#AccountFrm_address_1", &data.address1).await?;
                browser.fill("#AccountFrm_city", &data.city).await?;
                browser
                    .select_option("#AccountFrm_country_id", COUNTRY_UNITED_STATES)
                    .await?;
                browser
                    .select_option("#AccountFrm_zone_id", &data.zone_id)
                    .await?;
                browser.fill("#AccountFrm_postcode", &data.postcode).await?;

                // Login details
                browser.fill("#AccountFrm_loginname", &data.login_name).await?;
                browser.fill("#AccountFrm_password", &data.password).await?;
                browser.fill("#AccountFrm_confirm", &data.password).await?;

                // Accept the terms and submit
                browser.check("#AccountFrm_agree").await?;
                browser
                    .click("button:has-text(\"Continue\")")
                    .await?;
                Ok(())
            })
            .await
    }
}
