use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{debug, info};

/// Logs every request on arrival and its status and latency on completion.
pub async fn request_logging(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    debug!(method = %method, path = %path, "Incoming request");

    let response = next.run(req).await;

    info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Request completed"
    );

    response
}
