//! Logging middleware
//!
//! Records one line per HTTP request with method, path, status and latency.
//! Error responses are logged at the severity of the error that produced
//! them, together with its message.

use std::time::Instant;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{error, info, warn};
use crate::utils::errors::{ErrorReport, ErrorSeverity};

/// Log each request once its response is ready
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed_ms = start.elapsed().as_millis() as u64;

    match response.extensions().get::<ErrorReport>() {
        Some(report) => match report.severity {
            ErrorSeverity::Info => {
                info!(method = %method, path = %path, status, elapsed_ms, error = %report.message, "Request rejected")
            }
            ErrorSeverity::Warning => {
                warn!(method = %method, path = %path, status, elapsed_ms, error = %report.message, "Request rejected")
            }
            ErrorSeverity::Error | ErrorSeverity::Critical => {
                error!(method = %method, path = %path, status, elapsed_ms, error = %report.message, "Request failed")
            }
        },
        // Responses not built from ScholarHubError, e.g. axum's own 404/405
        None if response.status().is_server_error() => {
            error!(method = %method, path = %path, status, elapsed_ms, "Request failed")
        }
        None => info!(method = %method, path = %path, status, elapsed_ms, "Request completed"),
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{middleware, Router};
    use tower::ServiceExt;
    use crate::utils::errors::ScholarHubError;

    #[tokio::test]
    async fn test_error_responses_pass_through_unchanged() {
        let app = Router::new()
            .route("/ok", get(|| async { "ok" }))
            .route(
                "/missing",
                get(|| async { Err::<(), _>(ScholarHubError::not_found("Webinar not found")) }),
            )
            .layer(middleware::from_fn(log_requests));

        let ok = app
            .clone()
            .oneshot(Request::builder().uri("/ok").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);
        assert!(ok.extensions().get::<ErrorReport>().is_none());

        let missing = app
            .oneshot(Request::builder().uri("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        let report = missing.extensions().get::<ErrorReport>().unwrap();
        assert_eq!(report.message, "Webinar not found");
    }
}
