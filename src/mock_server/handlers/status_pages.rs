//! Status page endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::RwLock;

use super::{deleted_response, error_response};
use crate::mock_server::state::MockState;
use crate::{StatusPage, StatusPageParams, Visibility};

/// GET /status_pages
pub async fn list_status_pages(State(state): State<Arc<RwLock<MockState>>>) -> impl IntoResponse {
    let state = state.read().await;
    (StatusCode::OK, Json(state.status_pages.clone()))
}

/// GET /status_pages/{token}
pub async fn get_status_page(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(token): Path<String>,
) -> Response {
    let state = state.read().await;

    match state.get_status_page(&token) {
        Some(page) => (StatusCode::OK, Json(page.clone())).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "Status page not found"),
    }
}

/// POST /status_pages
pub async fn add_status_page(
    State(state): State<Arc<RwLock<MockState>>>,
    Json(params): Json<StatusPageParams>,
) -> Response {
    let mut state = state.write().await;

    if let Some(missing) = params
        .checks
        .iter()
        .flatten()
        .find(|token| state.get_check(token).is_none())
    {
        let message = format!("Unknown check: {missing}");
        return error_response(StatusCode::BAD_REQUEST, &message);
    }

    let token = state.next_token("sp");
    state.status_pages.push(StatusPage {
        token: token.clone(),
        url: Some(format!("https://updown.io/p/{token}")),
        name: None,
        description: None,
        visibility: Some(Visibility::Public),
        access_key: None,
        checks: vec![],
    });

    match state.update_status_page(&token, params) {
        Some(page) => (StatusCode::CREATED, Json(page.clone())).into_response(),
        None => error_response(StatusCode::INTERNAL_SERVER_ERROR, "Status page vanished"),
    }
}

/// PUT /status_pages/{token}
pub async fn update_status_page(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(token): Path<String>,
    Json(params): Json<StatusPageParams>,
) -> Response {
    let mut state = state.write().await;

    match state.update_status_page(&token, params) {
        Some(page) => (StatusCode::OK, Json(page.clone())).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "Status page not found"),
    }
}

/// DELETE /status_pages/{token}
pub async fn remove_status_page(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(token): Path<String>,
) -> Response {
    let mut state = state.write().await;

    if state.remove_status_page(&token) {
        deleted_response(true)
    } else {
        error_response(StatusCode::NOT_FOUND, "Status page not found")
    }
}
