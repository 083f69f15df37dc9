//! Mock updown API server.
//!
//! Provides an axum-based HTTP server that simulates the updown API.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// A mock updown API server for testing.
///
/// The server runs in the background and can be used to test the updown
/// client against a stateful API implementation.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL when creating an `UpdownClient` for testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test, e.g. to simulate
    /// changes made through another channel.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Number of check listings served so far.
    pub async fn check_list_requests(&self) -> usize {
        self.state.read().await.check_list_requests
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    /// Create state from a scenario.
    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        state.checks = scenario.checks;
        state.recipients = scenario.recipients;
        state.status_pages = scenario.status_pages;

        for (token, downtimes) in scenario.downtimes {
            state.downtimes.insert(token, downtimes);
        }

        for node in scenario.nodes {
            state.nodes.insert(node.name.clone(), node);
        }

        state
    }

    /// Create the axum router with all routes.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        let api = Router::new()
            // Check routes
            .route(
                "/checks",
                get(handlers::list_checks).post(handlers::add_check),
            )
            .route(
                "/checks/:token",
                get(handlers::get_check)
                    .put(handlers::update_check)
                    .delete(handlers::remove_check),
            )
            .route("/checks/:token/downtimes", get(handlers::list_downtimes))
            .route("/checks/:token/metrics", get(handlers::get_metrics))
            // Node routes
            .route("/nodes", get(handlers::list_nodes))
            .route("/nodes/ipv4", get(handlers::list_ipv4))
            .route("/nodes/ipv6", get(handlers::list_ipv6))
            // Recipient routes
            .route(
                "/recipients",
                get(handlers::list_recipients).post(handlers::add_recipient),
            )
            .route("/recipients/:id", axum::routing::delete(handlers::remove_recipient))
            // Status page routes
            .route(
                "/status_pages",
                get(handlers::list_status_pages).post(handlers::add_status_page),
            )
            .route(
                "/status_pages/:token",
                get(handlers::get_status_page)
                    .put(handlers::update_status_page)
                    .delete(handlers::remove_status_page),
            )
            .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key));

        Router::new()
            .merge(api)
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Reject requests without the configured `X-API-KEY`.
async fn require_api_key(
    State(state): State<Arc<RwLock<MockState>>>,
    request: Request,
    next: Next,
) -> Response {
    let required = state.read().await.required_api_key.clone();

    if let Some(expected) = required {
        let provided = request
            .headers()
            .get("x-api-key")
            .and_then(|v| v.to_str().ok());
        if provided != Some(expected.as_str()) {
            return handlers::error_response(StatusCode::UNAUTHORIZED, "Invalid API key");
        }
    }

    next.run(request).await
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
