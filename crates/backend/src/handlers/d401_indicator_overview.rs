use super::error_response;
use crate::dashboards::d401_indicator_overview;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::Json;
use contracts::dashboards::d401_indicator_overview::{OverviewRequest, OverviewResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct OverviewQuery {
    pub month: String,
    pub squad_id: Option<String>,
    pub compare: Option<bool>,
}

/// GET /api/d401/overview?month=YYYY-MM
pub async fn get_overview(
    Query(query): Query<OverviewQuery>,
) -> Result<Json<OverviewResponse>, (StatusCode, String)> {
    let request = OverviewRequest {
        month: query.month,
        squad_id: query.squad_id,
        compare_with_previous: query.compare.unwrap_or(true),
    };

    d401_indicator_overview::service::get_overview(request)
        .await
        .map(Json)
        .map_err(error_response)
}
