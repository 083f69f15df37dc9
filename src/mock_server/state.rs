//! Mock server state management.
//!
//! Provides the in-memory data store for the mock updown API server.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{Check, CheckParams, Downtime, Node, Recipient, StatusPage, StatusPageParams};

/// Shared state for the mock server.
///
/// Collections are kept in insertion order so listings are deterministic.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Checks in listing order.
    pub checks: Vec<Check>,

    /// Downtimes indexed by check token, newest first.
    pub downtimes: HashMap<String, Vec<Downtime>>,

    /// Recipients in listing order.
    pub recipients: Vec<Recipient>,

    /// Status pages in listing order.
    pub status_pages: Vec<StatusPage>,

    /// Monitoring nodes by name.
    pub nodes: BTreeMap<String, Node>,

    /// Optional API key. If set, requests must send it as `X-API-KEY`.
    pub required_api_key: Option<String>,

    /// Number of `GET /checks` requests served.
    pub check_list_requests: usize,

    next_id: u64,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a check to the state.
    pub fn with_check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    /// Add downtimes for a check.
    pub fn with_downtimes(mut self, token: &str, downtimes: Vec<Downtime>) -> Self {
        self.downtimes.insert(token.to_string(), downtimes);
        self
    }

    /// Add a recipient to the state.
    pub fn with_recipient(mut self, recipient: Recipient) -> Self {
        self.recipients.push(recipient);
        self
    }

    /// Add a status page to the state.
    pub fn with_status_page(mut self, page: StatusPage) -> Self {
        self.status_pages.push(page);
        self
    }

    /// Add a monitoring node to the state.
    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.insert(node.name.clone(), node);
        self
    }

    /// Set the required API key.
    pub fn with_required_api_key(mut self, key: &str) -> Self {
        self.required_api_key = Some(key.to_string());
        self
    }

    /// Allocate a fresh identifier with the given prefix.
    pub fn next_token(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}{}", self.next_id)
    }

    /// Get a check by token.
    pub fn get_check(&self, token: &str) -> Option<&Check> {
        self.checks.iter().find(|c| c.token == token)
    }

    /// Get a status page by token.
    pub fn get_status_page(&self, token: &str) -> Option<&StatusPage> {
        self.status_pages.iter().find(|p| p.token == token)
    }

    /// Apply the set fields of `params` to a check.
    pub fn update_check(&mut self, token: &str, params: CheckParams) -> Option<&Check> {
        let check = self.checks.iter_mut().find(|c| c.token == token)?;

        if let Some(url) = params.url {
            check.url = url;
        }
        if let Some(alias) = params.alias {
            check.alias = Some(alias);
        }
        if let Some(check_type) = params.check_type {
            check.check_type = Some(check_type);
        }
        if let Some(period) = params.period {
            check.period = Some(period);
        }
        if let Some(apdex_t) = params.apdex_t {
            check.apdex_t = Some(apdex_t);
        }
        if let Some(enabled) = params.enabled {
            check.enabled = enabled;
        }
        if let Some(published) = params.published {
            check.published = published;
        }
        if let Some(string_match) = params.string_match {
            check.string_match = Some(string_match);
        }
        if let Some(mute_until) = params.mute_until {
            check.mute_until = Some(mute_until);
        }
        if let Some(verb) = params.http_verb {
            check.http_verb = Some(verb);
        }
        if let Some(body) = params.http_body {
            check.http_body = Some(body);
        }
        if let Some(locations) = params.disabled_locations {
            check.disabled_locations = locations;
        }
        if let Some(recipients) = params.recipients {
            check.recipients = recipients;
        }
        if let Some(headers) = params.custom_headers {
            check.custom_headers = headers;
        }

        Some(&*check)
    }

    /// Apply the set fields of `params` to a status page.
    pub fn update_status_page(
        &mut self,
        token: &str,
        params: StatusPageParams,
    ) -> Option<&StatusPage> {
        let page = self.status_pages.iter_mut().find(|p| p.token == token)?;

        if let Some(checks) = params.checks {
            page.checks = checks;
        }
        if let Some(name) = params.name {
            page.name = Some(name);
        }
        if let Some(description) = params.description {
            page.description = Some(description);
        }
        if let Some(visibility) = params.visibility {
            page.visibility = Some(visibility);
        }
        if let Some(access_key) = params.access_key {
            page.access_key = Some(access_key);
        }

        Some(&*page)
    }

    /// Remove a check and its downtimes. Returns whether it existed.
    pub fn remove_check(&mut self, token: &str) -> bool {
        let before = self.checks.len();
        self.checks.retain(|c| c.token != token);
        self.downtimes.remove(token);
        self.checks.len() != before
    }

    /// Remove a recipient. Returns whether it existed.
    pub fn remove_recipient(&mut self, id: &str) -> bool {
        let before = self.recipients.len();
        self.recipients.retain(|r| r.id != id);
        self.recipients.len() != before
    }

    /// Remove a status page. Returns whether it existed.
    pub fn remove_status_page(&mut self, token: &str) -> bool {
        let before = self.status_pages.len();
        self.status_pages.retain(|p| p.token != token);
        self.status_pages.len() != before
    }
}
