//! Page objects for the storefront
//!
//! Thin wrappers over the `Browser` trait, one per page, each action
//! bracketed as a named step so the run log shows page-level progress.

pub mod home;
pub mod login;
pub mod registration;

pub use home::HomePage;
pub use login::LoginPage;
pub use registration::{RegistrationData, RegistrationPage};
