//! updown.io API client library.
//!
//! A Rust library for the [updown.io](https://updown.io) monitoring API
//! using a trait-based architecture where each operation (Get, List, Add,
//! Update, Remove) is defined as a trait that model types implement.
//!
//! # Quick Start
//!
//! ```no_run
//! use updown::{Check, CheckParams, UpdownClient, Add, Get, List};
//!
//! #[tokio::main]
//! async fn main() -> updown::Result<()> {
//!     // Create client from environment variables
//!     let client = UpdownClient::from_env()?;
//!
//!     // List all checks
//!     let checks = Check::list(&client, &()).await?;
//!     println!("Found {} checks", checks.len());
//!
//!     // Create one
//!     let check = Check::add(&client, CheckParams::new("https://example.com").alias("Example")).await?;
//!
//!     // Resolve an alias to its token; repeated lookups are served from cache
//!     let token = Check::token_for_alias(&client, "Example").await?;
//!     assert_eq!(token, check.token);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Alias resolution
//!
//! Checks are addressed by opaque tokens. [`Check::token_for_alias`] maps a
//! human-readable alias to its token through an [`AliasCache`] owned by the
//! client: a cached alias costs no request, a miss triggers exactly one full
//! check listing, after which the cache is rebuilt and consulted again.
//! An alias still absent afterwards yields [`UpdownError::AliasNotFound`],
//! kept distinct from transport and API errors.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `UPDOWN_API_KEY` (required) - Your updown API key
//! - `UPDOWN_API_URL` (optional) - Base URL (defaults to `https://updown.io/api`)

mod cache;
pub mod cli;
mod client;
mod error;
mod models;
mod output;
mod pagination;
mod traits;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use cache::{AliasCache, AliasedRecord, ResolveError};
pub use client::UpdownClient;
pub use error::{Result, UpdownError};
pub use output::PrettyPrint;
pub use pagination::Page;

// Re-export traits
pub use traits::{Add, Get, List, Paginate, Remove, Update, MAX_PAGES};

// Re-export models
pub use models::{
    // Check types
    Check,
    CheckParams,
    Ssl,
    // Downtime types
    Downtime,
    DOWNTIMES_PER_PAGE,
    // Metric types
    Metric,
    MetricGroup,
    MetricHost,
    MetricsQuery,
    Requests,
    ResponseTimes,
    Timings,
    // Node types
    Node,
    // Recipient types
    Recipient,
    RecipientParams,
    RecipientType,
    // Status page types
    StatusPage,
    StatusPageParams,
    Visibility,
};

// Re-export convenience functions
pub use models::{get_downtimes, get_downtimes_page};
pub use models::{get_grouped_metrics, get_metrics};
pub use models::{list_ipv4, list_ipv6};
