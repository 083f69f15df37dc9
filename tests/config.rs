//! Environment configuration tests.
//!
//! Kept in their own test binary with a single test so no other test races on
//! the process environment.

use updown::{UpdownClient, UpdownError};

#[test]
fn test_from_env() {
    std::env::remove_var("UPDOWN_API_KEY");
    std::env::remove_var("UPDOWN_API_URL");

    let err = UpdownClient::from_env().unwrap_err();
    assert!(matches!(err, UpdownError::ConfigMissing(_)));
    assert!(err.to_string().contains("UPDOWN_API_KEY"));

    std::env::set_var("UPDOWN_API_KEY", "env-key");
    let client = UpdownClient::from_env().unwrap();
    assert_eq!(client.base_url().as_str(), "https://updown.io/api/");

    std::env::set_var("UPDOWN_API_URL", "http://localhost:8080/api");
    let client = UpdownClient::from_env().unwrap();
    assert_eq!(client.base_url().as_str(), "http://localhost:8080/api/");
}
