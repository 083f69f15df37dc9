//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use std::collections::BTreeMap;

use chrono::{Duration, TimeZone, Utc};

use crate::{
    Check, Downtime, Node, Recipient, RecipientType, Ssl, StatusPage, Visibility,
};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Check Fixtures
    // =========================================================================

    /// Create a minimal enabled check that is up.
    pub fn check(token: &str, alias: &str) -> Check {
        Self::check_for_url(token, alias, &format!("https://{token}.example.com"))
    }

    /// Create a check on a specific URL.
    pub fn check_for_url(token: &str, alias: &str, url: &str) -> Check {
        Check {
            token: token.to_string(),
            url: url.to_string(),
            alias: Some(alias.to_string()),
            check_type: Some("http".to_string()),
            last_status: Some(200),
            uptime: Some(100.0),
            down: false,
            down_since: None,
            up_since: None,
            error: None,
            period: Some(60),
            apdex_t: Some(0.5),
            string_match: None,
            enabled: true,
            published: false,
            disabled_locations: vec![],
            recipients: vec![],
            last_check_at: None,
            next_check_at: None,
            created_at: None,
            mute_until: None,
            favicon_url: None,
            custom_headers: BTreeMap::new(),
            http_verb: Some("GET/HEAD".to_string()),
            http_body: None,
            ssl: None,
        }
    }

    /// Create a check without an alias.
    pub fn unaliased_check(token: &str, url: &str) -> Check {
        let mut check = Self::check_for_url(token, "", url);
        check.alias = None;
        check
    }

    /// Create a check that is currently down.
    pub fn down_check(token: &str, alias: &str, error: &str) -> Check {
        let mut check = Self::check(token, alias);
        check.down = true;
        check.last_status = Some(500);
        check.error = Some(error.to_string());
        check.uptime = Some(99.2);
        check.down_since = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).single();
        check
    }

    /// Create an HTTPS check with certificate details.
    pub fn https_check(token: &str, alias: &str) -> Check {
        let mut check = Self::check(token, alias);
        check.check_type = Some("https".to_string());
        check.ssl = Some(Ssl {
            tested_at: Utc.with_ymd_and_hms(2024, 5, 1, 7, 44, 8).single(),
            expires_at: Utc.with_ymd_and_hms(2024, 7, 23, 12, 0, 0).single(),
            valid: Some(true),
            error: None,
        });
        check
    }

    // =========================================================================
    // Downtime Fixtures
    // =========================================================================

    /// Create a finished ten minute downtime.
    pub fn downtime(id: &str, error: &str) -> Downtime {
        let started = Utc.with_ymd_and_hms(2024, 4, 30, 12, 0, 0).single();
        Downtime {
            id: id.to_string(),
            error: Some(error.to_string()),
            started_at: started,
            ended_at: started.map(|t| t + Duration::minutes(10)),
            duration: Some(600),
            partial: false,
        }
    }

    /// Create `count` downtimes with sequential IDs.
    pub fn downtimes(count: usize) -> Vec<Downtime> {
        (0..count)
            .map(|i| Self::downtime(&format!("dt{i}"), "timeout"))
            .collect()
    }

    // =========================================================================
    // Recipient / Status Page / Node Fixtures
    // =========================================================================

    /// Create an email recipient.
    pub fn email_recipient(id: &str, address: &str) -> Recipient {
        Recipient {
            id: id.to_string(),
            kind: RecipientType::Email,
            value: Some(address.to_string()),
            name: Some(address.to_string()),
        }
    }

    /// Create a public status page listing the given checks.
    pub fn status_page(token: &str, name: &str, checks: &[&str]) -> StatusPage {
        StatusPage {
            token: token.to_string(),
            url: Some(format!("https://updown.io/p/{token}")),
            name: Some(name.to_string()),
            description: None,
            visibility: Some(Visibility::Public),
            access_key: None,
            checks: checks.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Create a monitoring node.
    pub fn node(name: &str, city: &str, country_code: &str, ip: &str, ip6: &str) -> Node {
        Node {
            name: name.to_string(),
            ip: Some(ip.to_string()),
            ip6: Some(ip6.to_string()),
            city: Some(city.to_string()),
            country: None,
            country_code: Some(country_code.to_string()),
            lat: None,
            lng: None,
        }
    }

    // =========================================================================
    // Scenario Builders
    // =========================================================================

    /// Create a default set of test data for common scenarios.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario::new()
    }
}

/// A complete test scenario with related entities.
pub struct DefaultScenario {
    pub checks: Vec<Check>,
    pub downtimes: Vec<(String, Vec<Downtime>)>,
    pub recipients: Vec<Recipient>,
    pub status_pages: Vec<StatusPage>,
    pub nodes: Vec<Node>,
}

impl DefaultScenario {
    fn new() -> Self {
        let checks = vec![
            Fixtures::check_for_url("ngg8", "Main site", "https://updown.io"),
            Fixtures::down_check("4b3c", "API", "500 Internal Server Error"),
            Fixtures::https_check("x9k2", "Shop"),
        ];

        let downtimes = vec![(
            "4b3c".to_string(),
            vec![
                Fixtures::downtime("dt-2", "500 Internal Server Error"),
                Fixtures::downtime("dt-1", "timeout"),
            ],
        )];

        let recipients = vec![Fixtures::email_recipient("email:1", "ops@example.com")];

        let status_pages = vec![Fixtures::status_page("sp01", "Public status", &["ngg8", "4b3c"])];

        let nodes = vec![
            Fixtures::node("lan", "Los Angeles", "US", "45.76.64.78", "2001:19f0:6001:2c6::1"),
            Fixtures::node("rbx", "Roubaix", "FR", "91.121.222.175", "2001:41d0:2:85af::1"),
        ];

        Self {
            checks,
            downtimes,
            recipients,
            status_pages,
            nodes,
        }
    }
}
