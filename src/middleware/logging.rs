//! Request logging middleware

use std::time::Instant;

use axum::{
    body::Body,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

use super::auth::AuthenticatedUser;

/// Log every request with its status and duration.
///
/// Runs inside the session middleware so the acting user is known.
/// Server errors and client errors other than 404 are logged at warn level.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let user = request
        .extensions()
        .get::<AuthenticatedUser>()
        .map(|user| user.username.clone())
        .unwrap_or_else(|| "-".to_string());

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0);

    if status.is_server_error() {
        warn!(%method, %path, %user, status = status.as_u16(), %duration_ms, "Request failed");
    } else if status.is_client_error() && status != StatusCode::NOT_FOUND {
        warn!(%method, %path, %user, status = status.as_u16(), %duration_ms, "Request rejected");
    } else {
        info!(%method, %path, %user, status = status.as_u16(), %duration_ms, "Request completed");
    }

    response
}
