//! Monitoring nodes (the locations updown checks from).

use std::collections::BTreeMap;
use std::net::{Ipv4Addr, Ipv6Addr};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::UpdownClient;
use crate::error::{Result, UpdownError};
use crate::traits::List;

/// A monitoring location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Node name (e.g. "lan", "mia"). Taken from the response map key.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub ip6: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

#[async_trait]
impl List for Node {
    type Query = ();

    /// Lists nodes sorted by name.
    #[tracing::instrument(skip(client))]
    async fn list(client: &UpdownClient, _query: &()) -> Result<Vec<Self>> {
        let response = client.get("nodes").await?;
        let data: BTreeMap<String, Node> = response.json().await.map_err(UpdownError::HttpError)?;

        Ok(data
            .into_iter()
            .map(|(name, mut node)| {
                node.name = name;
                node
            })
            .collect())
    }
}

/// IPv4 addresses updown checks from, for firewall allow-lists.
#[tracing::instrument(skip(client))]
pub async fn list_ipv4(client: &UpdownClient) -> Result<Vec<Ipv4Addr>> {
    let response = client.get("nodes/ipv4").await?;
    let ips: Vec<Ipv4Addr> = response.json().await.map_err(UpdownError::HttpError)?;
    Ok(ips)
}

/// IPv6 addresses updown checks from, for firewall allow-lists.
#[tracing::instrument(skip(client))]
pub async fn list_ipv6(client: &UpdownClient) -> Result<Vec<Ipv6Addr>> {
    let response = client.get("nodes/ipv6").await?;
    let ips: Vec<Ipv6Addr> = response.json().await.map_err(UpdownError::HttpError)?;
    Ok(ips)
}
