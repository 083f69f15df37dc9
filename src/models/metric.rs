//! Check metrics.
//!
//! Values are carried as returned by updown; no aggregation happens here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::client::UpdownClient;
use crate::error::{Result, UpdownError};

/// How grouped metrics are keyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MetricGroup {
    /// One entry per hour, keyed by timestamp.
    Time,
    /// One entry per monitoring location.
    Host,
}

/// Time range for a metrics request.
///
/// Both bounds accept anything updown parses as a time (e.g. `2024-05-01`
/// or an ISO 8601 timestamp). Defaults to the last month remotely.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

impl MetricsQuery {
    /// Query for an explicit range.
    pub fn between(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
        }
    }
}

/// Performance summary for a check.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metric {
    #[serde(default)]
    pub apdex: Option<f64>,
    #[serde(default)]
    pub requests: Option<Requests>,
    #[serde(default)]
    pub timings: Option<Timings>,
    /// Location details, present when grouped by host.
    #[serde(default)]
    pub host: Option<MetricHost>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Requests {
    #[serde(default)]
    pub samples: u64,
    #[serde(default)]
    pub failures: u64,
    #[serde(default)]
    pub satisfied: u64,
    #[serde(default)]
    pub tolerated: u64,
    #[serde(default)]
    pub by_response_time: ResponseTimes,
}

/// Request counts bucketed by response time in milliseconds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseTimes {
    #[serde(default)]
    pub under125: u64,
    #[serde(default)]
    pub under250: u64,
    #[serde(default)]
    pub under500: u64,
    #[serde(default)]
    pub under1000: u64,
    #[serde(default)]
    pub under2000: u64,
    #[serde(default)]
    pub under4000: u64,
}

/// Average request phase durations in milliseconds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timings {
    #[serde(default)]
    pub redirect: u64,
    #[serde(default)]
    pub namelookup: u64,
    #[serde(default)]
    pub connection: u64,
    #[serde(default)]
    pub handshake: u64,
    #[serde(default)]
    pub response: u64,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricHost {
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}

#[derive(Serialize)]
struct RequestParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<MetricGroup>,
}

impl<'a> RequestParams<'a> {
    fn new(query: &'a MetricsQuery, group: Option<MetricGroup>) -> Self {
        Self {
            from: query.from.as_deref(),
            to: query.to.as_deref(),
            group,
        }
    }
}

fn metrics_path(token: &str) -> String {
    format!("checks/{}/metrics", urlencoding::encode(token))
}

/// Fetch the ungrouped metrics summary of a check.
#[tracing::instrument(skip(client))]
pub async fn get_metrics(
    client: &UpdownClient,
    token: &str,
    query: &MetricsQuery,
) -> Result<Metric> {
    let params = RequestParams::new(query, None);
    let response = client.get_with_query(&metrics_path(token), &params).await?;
    let metric: Metric = response.json().await.map_err(UpdownError::HttpError)?;
    Ok(metric)
}

/// Fetch metrics of a check grouped by time or by location.
#[tracing::instrument(skip(client))]
pub async fn get_grouped_metrics(
    client: &UpdownClient,
    token: &str,
    query: &MetricsQuery,
    group: MetricGroup,
) -> Result<BTreeMap<String, Metric>> {
    let params = RequestParams::new(query, Some(group));
    let response = client.get_with_query(&metrics_path(token), &params).await?;
    let metrics: BTreeMap<String, Metric> =
        response.json().await.map_err(UpdownError::HttpError)?;
    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_serialization() {
        let query = MetricsQuery::between("2024-05-01", "2024-05-02");
        let params = RequestParams::new(&query, Some(MetricGroup::Host));
        let serialized = serde_qs::to_string(&params).expect("Failed to serialize query");
        assert!(serialized.contains("from=2024-05-01"));
        assert!(serialized.contains("to=2024-05-02"));
        assert!(serialized.contains("group=host"));
    }

    #[test]
    fn test_empty_query_serialization() {
        let query = MetricsQuery::default();
        let params = RequestParams::new(&query, None);
        let serialized = serde_qs::to_string(&params).expect("Failed to serialize query");
        assert!(serialized.is_empty());
    }

    #[test]
    fn test_metric_deserialize() {
        let metric: Metric = serde_json::from_value(serde_json::json!({
            "apdex": 0.98,
            "requests": {
                "samples": 100,
                "failures": 2,
                "satisfied": 95,
                "tolerated": 3,
                "by_response_time": {
                    "under125": 70, "under250": 90, "under500": 95,
                    "under1000": 97, "under2000": 98, "under4000": 98
                }
            },
            "timings": {
                "redirect": 0, "namelookup": 9, "connection": 88,
                "handshake": 183, "response": 90, "total": 370
            }
        }))
        .unwrap();

        assert_eq!(metric.apdex, Some(0.98));
        let requests = metric.requests.unwrap();
        assert_eq!(requests.samples, 100);
        assert_eq!(requests.by_response_time.under250, 90);
        assert_eq!(metric.timings.unwrap().total, 370);
    }
}
