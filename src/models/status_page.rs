//! Status page model and trait implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::{DeleteResponse, UpdownClient};
use crate::error::{Result, UpdownError};
use crate::traits::{Add, Get, List, Remove, Update};

/// Who can see a status page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    /// Requires the access key.
    Protected,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
        }
    }
}

/// A status page aggregating several checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusPage {
    pub token: String,

    /// Public URL of the page.
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub visibility: Option<Visibility>,

    /// Key required to view a protected page.
    #[serde(default)]
    pub access_key: Option<String>,

    /// Check tokens shown on the page, in display order.
    #[serde(default)]
    pub checks: Vec<String>,
}

/// Body for creating or updating a status page. Unset fields are not sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusPageParams {
    /// Check tokens to show, in order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Text below the name; supports newlines and links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,
}

fn status_page_path(token: &str) -> String {
    format!("status_pages/{}", urlencoding::encode(token))
}

#[async_trait]
impl List for StatusPage {
    type Query = ();

    #[tracing::instrument(skip(client))]
    async fn list(client: &UpdownClient, _query: &()) -> Result<Vec<Self>> {
        let response = client.get("status_pages").await?;
        let pages: Vec<StatusPage> = response.json().await.map_err(UpdownError::HttpError)?;
        Ok(pages)
    }
}

#[async_trait]
impl Get for StatusPage {
    type Id = String; // Status page token

    #[tracing::instrument(skip(client))]
    async fn get(client: &UpdownClient, token: String) -> Result<Self> {
        let response = client.get(&status_page_path(&token)).await?;
        let page: StatusPage = response.json().await.map_err(UpdownError::HttpError)?;
        Ok(page)
    }
}

#[async_trait]
impl Add for StatusPage {
    type Params = StatusPageParams;

    #[tracing::instrument(skip(client))]
    async fn add(client: &UpdownClient, params: StatusPageParams) -> Result<Self> {
        let response = client.post("status_pages", &params).await?;
        let page: StatusPage = response.json().await.map_err(UpdownError::HttpError)?;
        Ok(page)
    }
}

#[async_trait]
impl Update for StatusPage {
    type Id = String; // Status page token
    type Params = StatusPageParams;

    #[tracing::instrument(skip(client))]
    async fn update(
        client: &UpdownClient,
        token: String,
        params: StatusPageParams,
    ) -> Result<Self> {
        let response = client.put(&status_page_path(&token), &params).await?;
        let page: StatusPage = response.json().await.map_err(UpdownError::HttpError)?;
        Ok(page)
    }
}

#[async_trait]
impl Remove for StatusPage {
    type Id = String; // Status page token

    #[tracing::instrument(skip(client))]
    async fn remove(client: &UpdownClient, token: String) -> Result<bool> {
        let response = client.delete(&status_page_path(&token)).await?;
        let data: DeleteResponse = response.json().await.map_err(UpdownError::HttpError)?;
        Ok(data.deleted)
    }
}
