//! Downtime model and pagination.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::UpdownClient;
use crate::error::{Result, UpdownError};
use crate::pagination::Page;
use crate::traits::Paginate;

/// Server-side page size of the downtimes endpoint.
pub const DOWNTIMES_PER_PAGE: u32 = 100;

/// A period during which a check was down.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Downtime {
    pub id: String,

    /// Error reported while down (e.g. "500 Internal Server Error").
    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,

    /// `None` while the downtime is ongoing.
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,

    /// Length in seconds.
    #[serde(default)]
    pub duration: Option<u64>,

    /// Whether only some locations saw the check down.
    #[serde(default)]
    pub partial: bool,
}

impl Downtime {
    /// Whether the downtime is still in progress.
    pub fn is_ongoing(&self) -> bool {
        self.ended_at.is_none()
    }
}

#[async_trait]
impl Paginate for Downtime {
    type Query = String; // Check token

    #[tracing::instrument(skip(client))]
    async fn list_page(client: &UpdownClient, token: &String, page: u32) -> Result<Page<Self>> {
        #[derive(Serialize)]
        struct RequestParams {
            page: u32,
        }

        let path = format!("checks/{}/downtimes", urlencoding::encode(token));
        let response = client.get_with_query(&path, &RequestParams { page }).await?;
        let items: Vec<Downtime> = response.json().await.map_err(UpdownError::HttpError)?;

        Ok(Page::new(items, page, DOWNTIMES_PER_PAGE))
    }
}

/// Fetch every downtime of a check, walking all pages.
pub async fn get_downtimes(client: &UpdownClient, token: &str) -> Result<Vec<Downtime>> {
    Downtime::list_all(client, &token.to_string()).await
}

/// Fetch a single page of downtimes (1-indexed, newest first).
pub async fn get_downtimes_page(
    client: &UpdownClient,
    token: &str,
    page: u32,
) -> Result<Page<Downtime>> {
    Downtime::list_page(client, &token.to_string(), page).await
}
