use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};

pub async fn request_logger(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let start = Instant::now();

    let response = next.run(request).await;

    let duration_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    // Query strings are left out: they carry tenant search terms.
    if response.status().is_server_error() {
        warn!(%method, %path, status, duration_ms, "Request failed");
    } else {
        info!(%method, %path, status, duration_ms, "Request completed");
    }

    response
}
