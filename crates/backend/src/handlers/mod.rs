use crate::shared::error::MetricsError;
use axum::http::StatusCode;

pub mod a001_indicator;
pub mod a002_indicator_value;
pub mod a003_squad;
pub mod a004_professional;
pub mod a005_job_role;
pub mod d400_dashboard_data;
pub mod d401_indicator_overview;
pub mod p900_organogram;
pub mod u501_bulk_import;

/// Service errors surface with their status and message
pub(crate) fn error_response(err: MetricsError) -> (StatusCode, String) {
    (err.status_code(), err.to_string())
}
