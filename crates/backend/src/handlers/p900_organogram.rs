use super::error_response;
use crate::projections::p900_organogram;
use axum::http::StatusCode;
use axum::Json;
use contracts::projections::p900_organogram::Organogram;

/// GET /api/p900/organogram
pub async fn get() -> Result<Json<Organogram>, (StatusCode, String)> {
    p900_organogram::service::get()
        .await
        .map(Json)
        .map_err(error_response)
}
