use axum::{extract::Request, http::header, middleware::Next, response::Response};
use tracing::info;

/// One line per request. Path only, the query string is not logged.
pub async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let content_length = response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0);

    info!(
        method = %method,
        path = %path,
        status = status,
        length = content_length,
        "HTTP request"
    );

    response
}
