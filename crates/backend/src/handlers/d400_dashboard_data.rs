use super::error_response;
use crate::dashboards::d400_dashboard_data;
use axum::http::StatusCode;
use axum::Json;
use contracts::dashboards::d400_dashboard_data::DashboardData;

/// GET /api/d400/dashboard-data
///
/// Best-effort read: always answers with a document, falling back to the
/// embedded default when no strategy can reach a stored one.
pub async fn fetch() -> Json<DashboardData> {
    Json(d400_dashboard_data::service::fetch().await)
}

/// PUT /api/d400/dashboard-data (admin only)
pub async fn save(
    Json(data): Json<DashboardData>,
) -> Result<Json<DashboardData>, (StatusCode, String)> {
    d400_dashboard_data::service::save(&data)
        .await
        .map(Json)
        .map_err(error_response)
}
