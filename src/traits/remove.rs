//! Remove trait for deleting entities.

use async_trait::async_trait;

use crate::client::UpdownClient;
use crate::error::Result;

/// Delete an entity.
#[async_trait]
pub trait Remove {
    /// The ID type for this entity.
    type Id;

    /// Delete the entity. Returns the `deleted` flag reported by updown.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn remove(client: &UpdownClient, id: Self::Id) -> Result<bool>;
}
