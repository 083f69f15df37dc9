//! List traits for fetching collections of entities.

use async_trait::async_trait;

use crate::client::UpdownClient;
use crate::error::Result;
use crate::pagination::Page;

/// Maximum pages to fetch (safety limit).
pub const MAX_PAGES: u32 = 1000;

/// List a whole collection in one request.
///
/// Most updown collections are returned unpaginated.
///
/// # Example
///
/// ```ignore
/// use updown::{UpdownClient, Check, List};
///
/// let client = UpdownClient::from_env()?;
/// let checks = Check::list(&client, &()).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// Scope or filter for the listing.
    type Query: Default + Send + Sync;

    /// List every entity matching the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn list(client: &UpdownClient, query: &Self::Query) -> Result<Vec<Self>>;
}

/// List a collection the API serves page by page.
#[async_trait]
pub trait Paginate: Sized + Send {
    /// Scope or filter for the listing.
    type Query: Send + Sync;

    /// Fetch one page (1-indexed).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn list_page(client: &UpdownClient, query: &Self::Query, page: u32)
        -> Result<Page<Self>>;

    /// Fetch every page until a short page comes back.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn list_all(client: &UpdownClient, query: &Self::Query) -> Result<Vec<Self>> {
        let mut all_items = Vec::new();
        let mut page = 1;

        loop {
            let result = Self::list_page(client, query, page).await?;
            let has_more = result.has_more;
            all_items.extend(result.items);

            if !has_more {
                break;
            }
            page += 1;

            if page > MAX_PAGES {
                tracing::warn!("Reached pagination limit of {} pages, stopping", MAX_PAGES);
                break;
            }
        }

        Ok(all_items)
    }
}
