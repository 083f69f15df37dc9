//! Check, downtime and metric endpoint handlers.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::{deleted_response, error_response};
use crate::mock_server::fixtures::Fixtures;
use crate::mock_server::state::MockState;
use crate::{
    CheckParams, Metric, MetricGroup, MetricHost, Requests, ResponseTimes, Timings,
    DOWNTIMES_PER_PAGE,
};

/// Query parameters for listing downtimes.
#[derive(Debug, Default, Deserialize)]
pub struct ListDowntimesQuery {
    pub page: Option<u32>,
}

/// Query parameters for metrics.
#[derive(Debug, Default, Deserialize)]
pub struct MetricsParams {
    #[allow(dead_code)] // Accepted by updown; the mock serves fixed data
    pub from: Option<String>,
    #[allow(dead_code)]
    pub to: Option<String>,
    pub group: Option<MetricGroup>,
}

/// GET /checks
pub async fn list_checks(State(state): State<Arc<RwLock<MockState>>>) -> impl IntoResponse {
    let mut state = state.write().await;
    state.check_list_requests += 1;

    (StatusCode::OK, Json(state.checks.clone()))
}

/// GET /checks/{token}
pub async fn get_check(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(token): Path<String>,
) -> Response {
    let state = state.read().await;

    match state.get_check(&token) {
        Some(check) => (StatusCode::OK, Json(check.clone())).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "Check not found"),
    }
}

/// POST /checks
pub async fn add_check(
    State(state): State<Arc<RwLock<MockState>>>,
    Json(params): Json<CheckParams>,
) -> Response {
    let Some(url) = params.url.clone().filter(|u| !u.is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "URL can't be blank");
    };

    let mut state = state.write().await;
    let token = state.next_token("chk");

    let mut check = Fixtures::unaliased_check(&token, &url);
    check.check_type = None;
    state.checks.push(check);

    match state.update_check(&token, params) {
        Some(check) => (StatusCode::CREATED, Json(check.clone())).into_response(),
        None => error_response(StatusCode::INTERNAL_SERVER_ERROR, "Check vanished"),
    }
}

/// PUT /checks/{token}
pub async fn update_check(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(token): Path<String>,
    Json(params): Json<CheckParams>,
) -> Response {
    let mut state = state.write().await;

    match state.update_check(&token, params) {
        Some(check) => (StatusCode::OK, Json(check.clone())).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "Check not found"),
    }
}

/// DELETE /checks/{token}
pub async fn remove_check(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(token): Path<String>,
) -> Response {
    let mut state = state.write().await;

    if state.remove_check(&token) {
        deleted_response(true)
    } else {
        error_response(StatusCode::NOT_FOUND, "Check not found")
    }
}

/// GET /checks/{token}/downtimes
pub async fn list_downtimes(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(token): Path<String>,
    Query(query): Query<ListDowntimesQuery>,
) -> Response {
    let state = state.read().await;

    if state.get_check(&token).is_none() {
        return error_response(StatusCode::NOT_FOUND, "Check not found");
    }

    let page = query.page.unwrap_or(1).max(1);
    let per_page = DOWNTIMES_PER_PAGE as usize;
    let start = (page as usize - 1) * per_page;

    let items: Vec<_> = state
        .downtimes
        .get(&token)
        .map(|all| all.iter().skip(start).take(per_page).cloned().collect())
        .unwrap_or_default();

    (StatusCode::OK, Json(items)).into_response()
}

/// GET /checks/{token}/metrics
pub async fn get_metrics(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(token): Path<String>,
    Query(params): Query<MetricsParams>,
) -> Response {
    let state = state.read().await;

    if state.get_check(&token).is_none() {
        return error_response(StatusCode::NOT_FOUND, "Check not found");
    }

    match params.group {
        None => (StatusCode::OK, Json(sample_metric())).into_response(),
        Some(MetricGroup::Time) => {
            let grouped: BTreeMap<String, Metric> = [
                ("2024-05-01T00:00:00Z".to_string(), sample_metric()),
                ("2024-05-01T01:00:00Z".to_string(), sample_metric()),
            ]
            .into_iter()
            .collect();
            (StatusCode::OK, Json(grouped)).into_response()
        }
        Some(MetricGroup::Host) => {
            let grouped: BTreeMap<String, Metric> = state
                .nodes
                .values()
                .map(|node| {
                    let mut metric = sample_metric();
                    metric.host = Some(MetricHost {
                        ip: node.ip.clone(),
                        city: node.city.clone(),
                        country: node.country.clone(),
                        country_code: node.country_code.clone(),
                    });
                    (node.name.clone(), metric)
                })
                .collect();
            (StatusCode::OK, Json(grouped)).into_response()
        }
    }
}

fn sample_metric() -> Metric {
    Metric {
        apdex: Some(0.99),
        requests: Some(Requests {
            samples: 240,
            failures: 1,
            satisfied: 236,
            tolerated: 3,
            by_response_time: ResponseTimes {
                under125: 180,
                under250: 230,
                under500: 238,
                under1000: 239,
                under2000: 239,
                under4000: 239,
            },
        }),
        timings: Some(Timings {
            redirect: 0,
            namelookup: 8,
            connection: 40,
            handshake: 70,
            response: 95,
            total: 213,
        }),
        host: None,
    }
}
