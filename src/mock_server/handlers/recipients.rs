//! Recipient endpoint handlers.

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
use crate::{Recipient, RecipientParams};

/// GET /recipients
pub async fn list_recipients(State(state): State<Arc<RwLock<MockState>>>) -> impl IntoResponse {
    let state = state.read().await;
    (StatusCode::OK, Json(state.recipients.clone()))
}

/// POST /recipients
pub async fn add_recipient(
    State(state): State<Arc<RwLock<MockState>>>,
    Json(params): Json<RecipientParams>,
) -> Response {
    if params.value.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Value can't be blank");
    }

    let mut state = state.write().await;
    let seq = state.next_token("");
    let recipient = Recipient {
        id: format!("{}:{}", params.kind, seq),
        kind: params.kind,
        name: params.name.or_else(|| Some(params.value.clone())),
        value: Some(params.value),
    };
    state.recipients.push(recipient.clone());

    (StatusCode::CREATED, Json(recipient)).into_response()
}

/// DELETE /recipients/{id}
pub async fn remove_recipient(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<String>,
) -> Response {
    let mut state = state.write().await;

    if state.remove_recipient(&id) {
        deleted_response(true)
    } else {
        error_response(StatusCode::NOT_FOUND, "Recipient not found")
    }
}
