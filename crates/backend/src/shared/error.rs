use thiserror::Error;

/// Error taxonomy of the metrics core.
///
/// Every variant is surfaced to the caller; nothing here is retried. The only
/// non-fatal error channel in the system is the bulk-import row error list,
/// which is data, not an error type.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Missing or malformed required field
    #[error("validation failed: {0}")]
    Validation(String),

    /// Referenced entity does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Store write failed after exhausting every strategy
    #[error("persistence failed: {0}")]
    Persistence(String),

    /// Bad logical period token, rejected before any query is issued
    #[error("invalid period format: {0}")]
    InvalidPeriodFormat(String),
}

impl From<sea_orm::DbErr> for MetricsError {
    fn from(err: sea_orm::DbErr) -> Self {
        MetricsError::Persistence(err.to_string())
    }
}

impl MetricsError {
    /// HTTP status the handlers map this variant to
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            MetricsError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            MetricsError::NotFound(_) => StatusCode::NOT_FOUND,
            MetricsError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            MetricsError::InvalidPeriodFormat(_) => StatusCode::BAD_REQUEST,
        }
    }
}
