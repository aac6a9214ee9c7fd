use super::error_response;
use crate::system::auth::extractor::CurrentIdentity;
use crate::usecases::u501_bulk_import;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use contracts::domain::a006_import_batch::aggregate::ImportBatch;
use contracts::usecases::u501_bulk_import::{BulkImportReport, BulkImportRequest};

/// POST /api/u501/import
///
/// Partial success is a 200 with errors in the report. Zero persisted rows is
/// not success: the caller gets the report back with 422 so "nothing to
/// import" stays distinguishable.
pub async fn import(
    identity: CurrentIdentity,
    Json(request): Json<BulkImportRequest>,
) -> Result<(StatusCode, Json<BulkImportReport>), (StatusCode, String)> {
    let report = u501_bulk_import::service::import(request, identity.actor())
        .await
        .map_err(error_response)?;

    let status = if report.success_count == 0 {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::OK
    };
    Ok((status, Json(report)))
}

/// GET /api/u501/template
pub async fn template() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        u501_bulk_import::template::generate_template(),
    )
}

/// GET /api/u501/batches
pub async fn list_batches() -> Result<Json<Vec<ImportBatch>>, (StatusCode, String)> {
    u501_bulk_import::service::list_batches()
        .await
        .map(Json)
        .map_err(error_response)
}
