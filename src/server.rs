//! HTTP surface of the mock registry.
//!
//! Three cases, dispatched by method and path exactly like the control plane
//! they implement: `POST /_register` stores a fixture, `POST /_reset` clears
//! the registry, and everything else is looked up as a mocked request. Errors
//! from any handler collapse to a 500 with a plain-text `Error: <message>`
//! body at the [`IntoResponse`] boundary.

use crate::error::MockError;
use crate::registry::{Fixture, RegisterRequest, Registry};
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Fixed listening port for the standalone server.
pub const DEFAULT_PORT: u16 = 8080;

/// Build the router over a shared registry.
///
/// Non-POST requests to the control paths fall through to the serve handler,
/// so a GET to `/_register` is an ordinary fixture lookup rather than a 405.
pub fn router(registry: Arc<Registry>) -> Router {
    Router::new()
        .route("/_register", post(register).fallback(serve_fixture))
        .route("/_reset", post(reset).fallback(serve_fixture))
        .fallback(serve_fixture)
        .with_state(registry)
}

/// `POST /_register`: store a fixture described by the JSON body.
async fn register(
    State(registry): State<Arc<Registry>>,
    request: Request,
) -> Result<StatusCode, MockError> {
    let body = axum::body::to_bytes(request.into_body(), usize::MAX)
        .await
        .map_err(|e| MockError::Internal(e.into()))?;
    let request: RegisterRequest = serde_json::from_slice(&body)?;

    let fixture = request.into_fixture().ok_or(MockError::NoPath)?;
    info!(fixture = ?fixture, "Registered response");
    registry.insert(fixture).await;

    Ok(StatusCode::OK)
}

/// `POST /_reset`: drop every fixture. Always succeeds.
async fn reset(State(registry): State<Arc<Registry>>) -> StatusCode {
    registry.reset().await;
    info!("Reset all responses");
    StatusCode::OK
}

/// Any other request: serve the fixture registered for its canonical path.
async fn serve_fixture(
    State(registry): State<Arc<Registry>>,
    request: Request,
) -> Result<Response, MockError> {
    let uri = request.uri();
    let raw_path = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    let canonical = crate::canonical::canonicalize(raw_path);

    let fixture = registry
        .consume(&canonical)
        .await
        .ok_or_else(|| MockError::NotRegistered(canonical.clone()))?;

    // Consumption already happened under the registry lock; the injected
    // latency is awaited here so unrelated requests are not held up.
    if fixture.timeout_ms > 0 {
        debug!(path = %canonical, timeout_ms = fixture.timeout_ms, "Delaying mocked response");
        tokio::time::sleep(Duration::from_millis(fixture.timeout_ms)).await;
    }

    build_mock_response(&canonical, fixture)
}

fn build_mock_response(canonical: &str, fixture: Fixture) -> Result<Response, MockError> {
    let body_text = match &fixture.body {
        Some(body) => {
            let text = body.render();
            info!(path = %canonical, body = %text, "Sending mocked response");
            text
        }
        None => {
            info!(path = %canonical, "Sending empty response");
            String::new()
        }
    };

    Response::builder()
        .status(fixture.status_code)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body_text))
        .map_err(|e| MockError::Internal(e.into()))
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        warn!(error = %self, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {}", self)).into_response()
    }
}
