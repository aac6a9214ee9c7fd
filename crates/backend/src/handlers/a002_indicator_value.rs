use super::error_response;
use crate::domain::a002_indicator_value;
use crate::shared::metrics::period::resolve_month;
use crate::system::auth::extractor::CurrentIdentity;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use contracts::domain::a002_indicator_value::aggregate::{
    IndicatorValue, IndicatorValueFormData, ValueFilter,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ValueListQuery {
    pub indicator_id: Option<String>,
    pub squad_id: Option<String>,
    /// Logical month token, resolved to period bounds server-side
    pub month: Option<String>,
    pub period_start_min: Option<NaiveDate>,
    pub period_end_max: Option<NaiveDate>,
}

/// GET /api/indicator_value
///
/// The month token is a convenience over explicit bounds; explicit bounds
/// win when both are present.
pub async fn list(
    Query(query): Query<ValueListQuery>,
) -> Result<Json<Vec<IndicatorValue>>, (StatusCode, String)> {
    let mut filter = ValueFilter {
        indicator_id: query.indicator_id,
        squad_id: query.squad_id,
        period_start_min: query.period_start_min,
        period_end_max: query.period_end_max,
    };

    if let Some(month) = &query.month {
        let range = resolve_month(month).map_err(error_response)?;
        filter.period_start_min = filter.period_start_min.or(Some(range.period_start));
        filter.period_end_max = filter.period_end_max.or(Some(range.period_end));
    }

    a002_indicator_value::service::list(filter)
        .await
        .map(Json)
        .map_err(error_response)
}

/// POST /api/indicator_value
pub async fn create(
    identity: CurrentIdentity,
    Json(form): Json<IndicatorValueFormData>,
) -> Result<Json<IndicatorValue>, (StatusCode, String)> {
    a002_indicator_value::service::create(form, identity.actor())
        .await
        .map(Json)
        .map_err(error_response)
}

/// PUT /api/indicator_value/:id
pub async fn update(
    Path(id): Path<String>,
    identity: CurrentIdentity,
    Json(form): Json<IndicatorValueFormData>,
) -> Result<Json<IndicatorValue>, (StatusCode, String)> {
    a002_indicator_value::service::update(&id, form, identity.actor())
        .await
        .map(Json)
        .map_err(error_response)
}

/// DELETE /api/indicator_value/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, (StatusCode, String)> {
    a002_indicator_value::service::delete(&id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(error_response)
}
