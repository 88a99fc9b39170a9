use async_trait::async_trait;
use tracing::debug;

use crate::api::types::{GetSystemLogsResponse, LogEntry, LogsQuery, SecurityStatusResponse};
use crate::services::system_service::{SystemError, SystemService, paginate};

pub const ENCRYPTION_STATUS: &str = "Active and Configured";
pub const API_SECURITY: &str = "Rate limiting and token validation in place";
pub const COMPLIANCE_STATUS: &str = "Compliant with GDPR and other standards";
pub const DETECTED_ISSUES: &[&str] = &["Example Issue: API Key unused for over a year"];

/// Serves the fixed sample logs and security report.
#[derive(Debug, Default)]
pub struct StaticSystemService;

impl StaticSystemService {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn sample_logs() -> Vec<LogEntry> {
        vec![
            LogEntry {
                timestamp: "2023-01-01T12:00:00+00:00".to_string(),
                log_type: "error".to_string(),
                message: "Example error log".to_string(),
                details: Some("Error details".to_string()),
            },
            LogEntry {
                timestamp: "2023-01-02T13:00:00+00:00".to_string(),
                log_type: "activity".to_string(),
                message: "Example activity log".to_string(),
                details: None,
            },
        ]
    }
}

#[async_trait]
impl SystemService for StaticSystemService {
    async fn get_system_logs(&self, query: LogsQuery) -> Result<GetSystemLogsResponse, SystemError> {
        debug!(
            start_time = ?query.start_time,
            end_time = ?query.end_time,
            log_type = ?query.log_type,
            "Filters not applied to sample logs"
        );

        paginate(&Self::sample_logs(), query.page, query.page_size)
    }

    async fn security_status(&self) -> Result<SecurityStatusResponse, SystemError> {
        Ok(SecurityStatusResponse {
            encryption_status: ENCRYPTION_STATUS.to_string(),
            api_security: API_SECURITY.to_string(),
            compliance_status: COMPLIANCE_STATUS.to_string(),
            detected_issues: DETECTED_ISSUES.iter().map(ToString::to_string).collect(),
        })
    }
}
