//! Mock updown API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the updown
//! API for integration and end-to-end testing. Unlike wiremock which mocks at
//! the HTTP level per-test, this server maintains state across requests,
//! enabling realistic workflow testing (create a check, resolve its alias,
//! delete it, ...).
//!
//! # Example
//!
//! ```ignore
//! use updown::mock_server::MockServer;
//! use updown::{Check, Get, UpdownClient};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = UpdownClient::new("test-key", server.url()).unwrap();
//!
//!     // Server comes with default fixtures
//!     let check = Check::get(&client, "ngg8".to_string()).await.unwrap();
//!     assert_eq!(check.alias.as_deref(), Some("Main site"));
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::MockState;
