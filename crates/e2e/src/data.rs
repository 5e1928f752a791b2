//! Sample users and uniqueness helpers
//!
//! Fixed sample data plus clock-based uniqueness only; fake-data
//! generation is an external concern the suite does not carry.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::pages::RegistrationData;

// Zone ids the storefront assigns to a few US states
pub const ZONE_CALIFORNIA: &str = "3613";
pub const ZONE_FLORIDA: &str = "3618";
pub const ZONE_NEW_YORK: &str = "3635";
pub const ZONE_TEXAS: &str = "3644";

static SEQ: AtomicU64 = AtomicU64::new(0);

fn timestamp_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

fn next_seq() -> u64 {
    SEQ.fetch_add(1, Ordering::Relaxed)
}

pub fn default_user() -> RegistrationData {
    RegistrationData {
        first_name: "Test".into(),
        last_name: "User".into(),
        email: "test.user@example.com".into(),
        telephone: "123-456-7890".into(),
        company: "Test Company".into(),
        address1: "123 Test St".into(),
        city: "Test City".into(),
        zone_id: ZONE_CALIFORNIA.into(),
        postcode: "12345".into(),
        login_name: "testuser".into(),
        password: "Password123!".into(),
    }
}

pub fn admin_user() -> RegistrationData {
    RegistrationData {
        first_name: "Admin".into(),
        last_name: "User".into(),
        email: "admin@example.com".into(),
        telephone: "123-456-7890".into(),
        company: "Admin Company".into(),
        address1: "123 Admin St".into(),
        city: "Admin City".into(),
        zone_id: ZONE_FLORIDA.into(),
        postcode: "12345".into(),
        login_name: "adminuser".into(),
        password: "AdminPass123!".into(),
    }
}

/// Email address unique within (and across) runs
pub fn unique_email() -> String {
    format!("test.user.{}-{}@example.com", timestamp_millis(), next_seq())
}

/// Login name unique within (and across) runs
pub fn unique_username() -> String {
    format!("testuser{}{}", timestamp_millis(), next_seq())
}

/// The default sample user with run-unique email and login name, as the
/// registration form requires.
pub fn unique_registration_data() -> RegistrationData {
    RegistrationData {
        email: unique_email(),
        login_name: unique_username(),
        ..default_user()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_fields_differ_between_calls() {
        let a = unique_registration_data();
        let b = unique_registration_data();
        assert_ne!(a.email, b.email);
        assert_ne!(a.login_name, b.login_name);
        // The rest of the profile is the stable sample user.
        assert_eq!(a.first_name, b.first_name);
        assert_eq!(a.zone_id, ZONE_CALIFORNIA);
    }

    #[test]
    fn test_sample_users_are_distinct() {
        assert_ne!(default_user().login_name, admin_user().login_name);
        assert_eq!(admin_user().zone_id, ZONE_FLORIDA);
    }
}
