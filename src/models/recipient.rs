//! Alert recipient model and trait implementations.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::{DeleteResponse, UpdownClient};
use crate::error::{Result, UpdownError};
use crate::traits::{Add, List, Remove};

/// Delivery channel of a recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientType {
    Email,
    Sms,
    Telegram,
    Slack,
    Webhook,
    Zapier,
    /// A channel this crate does not know yet, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

impl RecipientType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
            Self::Telegram => "telegram",
            Self::Slack => "slack",
            Self::Webhook => "webhook",
            Self::Zapier => "zapier",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for RecipientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecipientType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "email" => Self::Email,
            "sms" => Self::Sms,
            "telegram" => Self::Telegram,
            "slack" => Self::Slack,
            "webhook" => Self::Webhook,
            "zapier" => Self::Zapier,
            _ => Self::Other(s.to_string()),
        })
    }
}

/// Someone (or something) notified when a check changes state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipient {
    /// Recipient ID (e.g. "email:1234567").
    pub id: String,

    #[serde(rename = "type")]
    pub kind: RecipientType,

    /// Address, phone number or URL depending on the type.
    #[serde(default)]
    pub value: Option<String>,

    #[serde(default)]
    pub name: Option<String>,
}

/// Body for creating a recipient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipientParams {
    #[serde(rename = "type")]
    pub kind: RecipientType,

    pub value: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RecipientParams {
    pub fn new(kind: RecipientType, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            name: None,
        }
    }
}

/// Recipient IDs look like `email:123`; the `:` is legal in a path segment
/// and updown expects it unescaped.
fn recipient_path(id: &str) -> String {
    format!("recipients/{}", urlencoding::encode(id).replace("%3A", ":"))
}

#[async_trait]
impl List for Recipient {
    type Query = ();

    #[tracing::instrument(skip(client))]
    async fn list(client: &UpdownClient, _query: &()) -> Result<Vec<Self>> {
        let response = client.get("recipients").await?;
        let recipients: Vec<Recipient> = response.json().await.map_err(UpdownError::HttpError)?;
        Ok(recipients)
    }
}

#[async_trait]
impl Add for Recipient {
    type Params = RecipientParams;

    #[tracing::instrument(skip(client))]
    async fn add(client: &UpdownClient, params: RecipientParams) -> Result<Self> {
        let response = client.post("recipients", &params).await?;
        let recipient: Recipient = response.json().await.map_err(UpdownError::HttpError)?;
        Ok(recipient)
    }
}

#[async_trait]
impl Remove for Recipient {
    type Id = String; // Recipient ID

    #[tracing::instrument(skip(client))]
    async fn remove(client: &UpdownClient, id: String) -> Result<bool> {
        let response = client.delete(&recipient_path(&id)).await?;
        let data: DeleteResponse = response.json().await.map_err(UpdownError::HttpError)?;
        Ok(data.deleted)
    }
}
