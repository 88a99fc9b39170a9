use crate::api::types::{ApiDocumentationResponse, EndpointDoc};

pub const API_TITLE: &str = "qrforge API";

const fn endpoint(
    method: &'static str,
    path: &'static str,
    description: &'static str,
) -> EndpointDoc {
    EndpointDoc {
        method,
        path,
        description,
    }
}

pub const ENDPOINTS: &[EndpointDoc] = &[
    endpoint("POST", "/auth/login", "Exchange email and password for an access token"),
    endpoint("POST", "/auth/logout", "Revoke an access token"),
    endpoint("GET", "/auth/permission/check", "Check whether a token may perform an action"),
    endpoint("POST", "/generate", "Render a QR code and return its URL"),
    endpoint("POST", "/customize", "Change color, size and logo of a stored QR code"),
    endpoint("POST", "/batch/create", "Queue several QR code requests at once"),
    endpoint("GET", "/user/preferences", "List stored user preferences"),
    endpoint("PUT", "/user/preferences/update", "Create or update a user's preferences"),
    endpoint("GET", "/logs/system", "Page through system logs"),
    endpoint("GET", "/security/status", "Summarize the current security posture"),
    endpoint("GET", "/api/docs", "This document"),
    endpoint("GET", "/qr/{file}", "Download a rendered QR code"),
    endpoint("GET", "/health", "Liveness and database reachability"),
    endpoint("GET", "/metrics", "Prometheus metrics"),
];

#[must_use]
pub fn api_documentation() -> ApiDocumentationResponse {
    ApiDocumentationResponse {
        title: API_TITLE,
        version: env!("CARGO_PKG_VERSION"),
        documentation: "Generate QR codes from URLs, text, vCards, JSON or CSV, customize them, \
            queue batches and manage per-user rendering preferences. Request and response \
            bodies are JSON; errors are returned as {\"error\": \"...\"}."
            .to_string(),
        endpoints: ENDPOINTS.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_public_route_once() {
        let docs = api_documentation();
        assert_eq!(docs.endpoints.len(), ENDPOINTS.len());

        let mut routes: Vec<_> = docs.endpoints.iter().map(|e| (e.method, e.path)).collect();
        routes.sort_unstable();
        routes.dedup();
        assert_eq!(routes.len(), ENDPOINTS.len());
        assert!(routes.contains(&("POST", "/generate")));
    }
}
