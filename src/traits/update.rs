//! Update trait for modifying entities.

use async_trait::async_trait;

use crate::client::UpdownClient;
use crate::error::Result;

/// Update an existing entity.
///
/// # Example
///
/// ```ignore
/// use updown::{UpdownClient, Check, CheckParams, Update};
///
/// let client = UpdownClient::from_env()?;
/// let updated = Check::update(
///     &client,
///     "ngg8".to_string(),
///     CheckParams {
///         period: Some(60),
///         ..Default::default()
///     },
/// ).await?;
/// ```
#[async_trait]
pub trait Update: Sized {
    /// The ID type for this entity.
    type Id;

    /// Parameters for the update.
    type Params;

    /// Update the entity and return the updated version.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn update(client: &UpdownClient, id: Self::Id, params: Self::Params) -> Result<Self>;
}
