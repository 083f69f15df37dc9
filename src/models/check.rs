//! Check model and trait implementations.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::AliasedRecord;
use crate::client::{DeleteResponse, UpdownClient};
use crate::error::{Result, UpdownError};
use crate::traits::{Add, Get, List, Remove, Update};

/// An updown check: one monitored URL or host.
///
/// Checks are addressed by their `token`, which updown assigns on creation
/// and never changes. The `alias` is a free-form label and may be shared by
/// several checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Check {
    /// Unique, immutable check token (e.g. "ngg8").
    pub token: String,

    /// Monitored URL (`https://…`, `tcp://host:port`, or a bare host for ICMP).
    pub url: String,

    /// Human readable name.
    #[serde(default)]
    pub alias: Option<String>,

    /// Check type ("http", "https", "icmp", "tcp", "tcps").
    #[serde(rename = "type", default)]
    pub check_type: Option<String>,

    /// HTTP status (or equivalent) of the last check.
    #[serde(default)]
    pub last_status: Option<u16>,

    /// Uptime percentage over the last 30 days.
    #[serde(default)]
    pub uptime: Option<f64>,

    /// Whether the check is currently down.
    #[serde(default)]
    pub down: bool,

    #[serde(default)]
    pub down_since: Option<DateTime<Utc>>,

    #[serde(default)]
    pub up_since: Option<DateTime<Utc>>,

    /// Error of the last failed check.
    #[serde(default)]
    pub error: Option<String>,

    /// Interval in seconds between checks.
    #[serde(default)]
    pub period: Option<u32>,

    /// APDEX threshold in seconds.
    #[serde(default)]
    pub apdex_t: Option<f64>,

    /// Text that must be present in the response body.
    #[serde(default)]
    pub string_match: Option<String>,

    #[serde(default)]
    pub enabled: bool,

    /// Whether the public status page is enabled.
    #[serde(default)]
    pub published: bool,

    /// Monitoring locations excluded from this check.
    #[serde(default)]
    pub disabled_locations: Vec<String>,

    /// Recipient IDs notified for this check.
    #[serde(default)]
    pub recipients: Vec<String>,

    #[serde(default)]
    pub last_check_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub next_check_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Mute state: a timestamp, "recovery" or "forever".
    #[serde(default)]
    pub mute_until: Option<String>,

    #[serde(default)]
    pub favicon_url: Option<String>,

    /// Extra HTTP headers sent with each request.
    #[serde(default)]
    pub custom_headers: BTreeMap<String, String>,

    #[serde(default)]
    pub http_verb: Option<String>,

    #[serde(default)]
    pub http_body: Option<String>,

    /// Certificate information for HTTPS checks.
    #[serde(default)]
    pub ssl: Option<Ssl>,
}

/// TLS certificate state of an HTTPS check.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ssl {
    #[serde(default)]
    pub tested_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub valid: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Check {
    /// The alias, or the URL when no alias is set.
    pub fn display_name(&self) -> &str {
        self.alias
            .as_deref()
            .filter(|a| !a.is_empty())
            .unwrap_or(&self.url)
    }

    /// Whether the check is enabled and currently up.
    pub fn is_up(&self) -> bool {
        self.enabled && !self.down
    }

    /// Whether the certificate was found valid on the last SSL test.
    pub fn ssl_valid(&self) -> Option<bool> {
        self.ssl.as_ref().and_then(|s| s.valid)
    }

    /// Resolve a check alias to its token.
    ///
    /// Uses the client's alias cache: a cached alias resolves without any
    /// request. Otherwise all checks are listed once, the cache is rebuilt
    /// from that listing, and the alias is looked up again.
    ///
    /// # Errors
    ///
    /// Returns [`UpdownError::AliasNotFound`] if no check carries the alias,
    /// or the listing error if the checks could not be fetched.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let token = Check::token_for_alias(&client, "Marketing site").await?;
    /// let check = Check::get(&client, token).await?;
    /// ```
    #[tracing::instrument(skip(client))]
    pub async fn token_for_alias(client: &UpdownClient, alias: &str) -> Result<String> {
        client
            .alias_cache()
            .resolve(alias, || fetch_checks(client))
            .await
            .map_err(UpdownError::from)
    }

    /// Fetch a check by alias rather than token.
    pub async fn get_by_alias(client: &UpdownClient, alias: &str) -> Result<Self> {
        let token = Self::token_for_alias(client, alias).await?;
        Self::get(client, token).await
    }
}

impl AliasedRecord for Check {
    fn alias(&self) -> &str {
        self.alias.as_deref().unwrap_or("")
    }

    fn token(&self) -> &str {
        &self.token
    }
}

/// Body for creating or updating a check. Unset fields are not sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    /// Check type ("http", "icmp", "tcp", ...). Inferred from the URL if unset.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub check_type: Option<String>,

    /// Interval in seconds (15, 30, 60, 120, 300, 600, 1800 or 3600).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub apdex_t: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub string_match: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mute_until: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_verb: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_body: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled_locations: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipients: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_headers: Option<BTreeMap<String, String>>,
}

impl CheckParams {
    /// Params for a new check on `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Set the alias.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

fn check_path(token: &str) -> String {
    format!("checks/{}", urlencoding::encode(token))
}

/// Raw listing, without touching the alias cache.
async fn fetch_checks(client: &UpdownClient) -> Result<Vec<Check>> {
    let response = client.get("checks").await?;
    let checks: Vec<Check> = response.json().await.map_err(UpdownError::HttpError)?;
    Ok(checks)
}

#[async_trait]
impl List for Check {
    type Query = ();

    /// Lists all checks and refreshes the alias cache from the result.
    #[tracing::instrument(skip(client))]
    async fn list(client: &UpdownClient, _query: &()) -> Result<Vec<Self>> {
        let checks = fetch_checks(client).await?;
        client.alias_cache().replace(&checks).await;
        Ok(checks)
    }
}

#[async_trait]
impl Get for Check {
    type Id = String; // Check token

    #[tracing::instrument(skip(client))]
    async fn get(client: &UpdownClient, token: String) -> Result<Self> {
        let response = client.get(&check_path(&token)).await?;
        let check: Check = response.json().await.map_err(UpdownError::HttpError)?;
        Ok(check)
    }
}

#[async_trait]
impl Add for Check {
    type Params = CheckParams;

    #[tracing::instrument(skip(client))]
    async fn add(client: &UpdownClient, params: CheckParams) -> Result<Self> {
        let response = client.post("checks", &params).await?;
        let check: Check = response.json().await.map_err(UpdownError::HttpError)?;
        Ok(check)
    }
}

#[async_trait]
impl Update for Check {
    type Id = String; // Check token
    type Params = CheckParams;

    #[tracing::instrument(skip(client))]
    async fn update(client: &UpdownClient, token: String, params: CheckParams) -> Result<Self> {
        let response = client.put(&check_path(&token), &params).await?;
        let check: Check = response.json().await.map_err(UpdownError::HttpError)?;
        Ok(check)
    }
}

#[async_trait]
impl Remove for Check {
    type Id = String; // Check token

    #[tracing::instrument(skip(client))]
    async fn remove(client: &UpdownClient, token: String) -> Result<bool> {
        let response = client.delete(&check_path(&token)).await?;
        let data: DeleteResponse = response.json().await.map_err(UpdownError::HttpError)?;
        Ok(data.deleted)
    }
}
