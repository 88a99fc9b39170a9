use axum::{
    extract::{MatchedPath, Request, State},
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::api::AppState;
use crate::services::docs::ENDPOINTS;

const QR_FILES_ROUTE: &str = "/qr/{file}";
const UNMATCHED_ROUTE: &str = "unmatched";

/// `GET /metrics`
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

/// Route label for metrics. Unknown paths collapse into one label so scanners
/// cannot grow the series count.
fn route_label(matched: Option<&str>, path: &str) -> &'static str {
    let wanted = matched.unwrap_or(path);

    if let Some(endpoint) = ENDPOINTS.iter().find(|e| e.path == wanted) {
        return endpoint.path;
    }
    if path.starts_with("/qr/") {
        return QR_FILES_ROUTE;
    }
    UNMATCHED_ROUTE
}

fn outcome(status: StatusCode) -> &'static str {
    if status.is_server_error() {
        "error"
    } else if status.is_client_error() {
        "client_error"
    } else {
        "success"
    }
}

/// Opens a span per request, records request metrics and logs one line when
/// the response is ready.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let route = route_label(
        req.extensions().get::<MatchedPath>().map(MatchedPath::as_str),
        &path,
    );

    let span = info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %method,
        path = %path,
        route,
    );

    async move {
        let response = next.run(req).await;
        let status = response.status();
        let elapsed = start.elapsed();

        let labels = [
            ("method", method.to_string()),
            ("path", route.to_string()),
            ("status", status.as_u16().to_string()),
        ];
        metrics::counter!("http_requests_total", &labels).increment(1);
        metrics::histogram!("http_request_duration_seconds", &labels)
            .record(elapsed.as_secs_f64());

        let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        if status.is_server_error() {
            warn!(
                duration_ms,
                status = status.as_u16(),
                outcome = outcome(status),
                "Request failed"
            );
        } else {
            info!(
                duration_ms,
                status = status.as_u16(),
                outcome = outcome(status),
                "Request finished"
            );
        }

        response
    }
    .instrument(span)
    .await
}

/// QR images are served from disk under `/qr`, so browsers must not sniff or
/// frame them.
pub async fn security_headers_middleware(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(header::REFERRER_POLICY, HeaderValue::from_static("no-referrer"));

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_routes_keep_their_path() {
        assert_eq!(route_label(None, "/generate"), "/generate");
        assert_eq!(route_label(Some("/health"), "/health"), "/health");
        assert_eq!(
            route_label(None, "/user/preferences/update"),
            "/user/preferences/update"
        );
    }

    #[test]
    fn rendered_files_share_a_label() {
        assert_eq!(route_label(None, "/qr/abc.png"), QR_FILES_ROUTE);
        assert_eq!(route_label(None, "/qr/other.png"), QR_FILES_ROUTE);
    }

    #[test]
    fn unknown_paths_collapse() {
        assert_eq!(route_label(None, "/wp-admin/login.php"), UNMATCHED_ROUTE);
        assert_eq!(route_label(None, "/generate/extra"), UNMATCHED_ROUTE);
    }

    #[test]
    fn outcome_by_status_class() {
        assert_eq!(outcome(StatusCode::OK), "success");
        assert_eq!(outcome(StatusCode::NOT_FOUND), "client_error");
        assert_eq!(outcome(StatusCode::SERVICE_UNAVAILABLE), "error");
    }
}
