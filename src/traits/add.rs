//! Add trait for creating entities.

use async_trait::async_trait;

use crate::client::UpdownClient;
use crate::error::Result;

/// Create a new entity.
#[async_trait]
pub trait Add: Sized {
    /// Request body for the creation.
    type Params: Send + Sync;

    /// Create the entity and return it as stored by updown.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails remotely or the request fails.
    async fn add(client: &UpdownClient, params: Self::Params) -> Result<Self>;
}
