//! Domain service for system logs and security posture.
//!
//! Both answers are canned: nothing collects real logs or audits yet.

use thiserror::Error;

use crate::api::types::{GetSystemLogsResponse, LogEntry, LogsQuery, SecurityStatusResponse};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for SystemError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for SystemError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait SystemService: Send + Sync {
    /// Returns one page of system logs.
    ///
    /// Time range and type filters are accepted but not applied. When either
    /// `page` or `page_size` is missing, everything is returned as page 1.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::Validation`] when `page` or `page_size` is zero.
    async fn get_system_logs(&self, query: LogsQuery) -> Result<GetSystemLogsResponse, SystemError>;

    async fn security_status(&self) -> Result<SecurityStatusResponse, SystemError>;
}

/// Slices `logs` into the requested page.
pub fn paginate(
    logs: &[LogEntry],
    page: Option<u32>,
    page_size: Option<u32>,
) -> Result<GetSystemLogsResponse, SystemError> {
    let total = u32::try_from(logs.len()).unwrap_or(u32::MAX);

    // Paging only applies when both values are given; a lone value is ignored.
    let (page, page_size) = match (page, page_size) {
        (Some(0), Some(_)) => {
            return Err(SystemError::Validation("page must be at least 1".to_string()));
        }
        (Some(_), Some(0)) => {
            return Err(SystemError::Validation(
                "page_size must be at least 1".to_string(),
            ));
        }
        (Some(page), Some(page_size)) => (page, page_size),
        _ => (1, total.max(1)),
    };

    let total_pages = total / page_size + u32::from(total % page_size > 0);

    let start = (page as usize - 1).saturating_mul(page_size as usize);
    let page_logs: Vec<LogEntry> = logs
        .iter()
        .skip(start)
        .take(page_size as usize)
        .cloned()
        .collect();

    Ok(GetSystemLogsResponse {
        logs_per_page: u32::try_from(page_logs.len()).unwrap_or(u32::MAX),
        logs: page_logs,
        page,
        total_pages,
        total_logs: total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logs(n: usize) -> Vec<LogEntry> {
        (0..n)
            .map(|i| LogEntry {
                timestamp: format!("2023-01-0{}T00:00:00+00:00", i + 1),
                log_type: "activity".to_string(),
                message: format!("log {i}"),
                details: None,
            })
            .collect()
    }

    #[test]
    fn no_paging_returns_everything() {
        let page = paginate(&logs(2), None, None).unwrap();
        assert_eq!(page.logs.len(), 2);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.logs_per_page, 2);
    }

    #[test]
    fn partial_paging_is_ignored() {
        let page = paginate(&logs(2), Some(2), None).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.logs.len(), 2);
    }

    #[test]
    fn lone_zero_is_ignored() {
        let page = paginate(&logs(2), None, Some(0)).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.logs.len(), 2);

        let page = paginate(&logs(2), Some(0), None).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn remainder_adds_a_page() {
        let page = paginate(&logs(5), Some(3), Some(2)).unwrap();
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.logs_per_page, 1);
        assert_eq!(page.logs[0].message, "log 4");
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let page = paginate(&logs(2), Some(9), Some(1)).unwrap();
        assert!(page.logs.is_empty());
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.logs_per_page, 0);
    }

    #[test]
    fn zero_values_are_rejected() {
        assert!(matches!(
            paginate(&logs(2), Some(0), Some(1)),
            Err(SystemError::Validation(_))
        ));
        assert!(matches!(
            paginate(&logs(2), Some(1), Some(0)),
            Err(SystemError::Validation(_))
        ));
    }
}
