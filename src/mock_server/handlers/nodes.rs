//! Node endpoint handlers.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;
use crate::Node;

/// GET /nodes
pub async fn list_nodes(State(state): State<Arc<RwLock<MockState>>>) -> impl IntoResponse {
    let state = state.read().await;
    let nodes: BTreeMap<String, Node> = state.nodes.clone();

    (StatusCode::OK, Json(nodes))
}

/// GET /nodes/ipv4
pub async fn list_ipv4(State(state): State<Arc<RwLock<MockState>>>) -> impl IntoResponse {
    let state = state.read().await;
    let ips: Vec<String> = state.nodes.values().filter_map(|n| n.ip.clone()).collect();

    (StatusCode::OK, Json(ips))
}

/// GET /nodes/ipv6
pub async fn list_ipv6(State(state): State<Arc<RwLock<MockState>>>) -> impl IntoResponse {
    let state = state.read().await;
    let ips: Vec<String> = state.nodes.values().filter_map(|n| n.ip6.clone()).collect();

    (StatusCode::OK, Json(ips))
}
