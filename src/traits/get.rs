//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::UpdownClient;
use crate::error::Result;

/// Fetch a single entity by ID.
///
/// # Example
///
/// ```ignore
/// use updown::{UpdownClient, Check, Get};
///
/// let client = UpdownClient::from_env()?;
/// let check = Check::get(&client, "ngg8".to_string()).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity (a token for checks and status pages).
    type Id;

    /// Fetch the entity by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn get(client: &UpdownClient, id: Self::Id) -> Result<Self>;
}
