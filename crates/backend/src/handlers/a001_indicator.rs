use super::error_response;
use crate::domain::a001_indicator;
use crate::system::auth::extractor::CurrentIdentity;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a001_indicator::aggregate::{Indicator, IndicatorFormData};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// true limits the listing to active indicators
    #[serde(default)]
    pub active: Option<bool>,
}

/// GET /api/indicator
pub async fn list_all(
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Indicator>>, (StatusCode, String)> {
    let only_active = query.active.unwrap_or(false);
    a001_indicator::service::list_all(only_active)
        .await
        .map(Json)
        .map_err(error_response)
}

/// GET /api/indicator/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Indicator>, (StatusCode, String)> {
    match a001_indicator::service::get_by_id(&id).await {
        Ok(Some(indicator)) => Ok(Json(indicator)),
        Ok(None) => Err((StatusCode::NOT_FOUND, format!("Indicator {} not found", id))),
        Err(err) => Err(error_response(err)),
    }
}

/// POST /api/indicator
pub async fn create(
    identity: CurrentIdentity,
    Json(form): Json<IndicatorFormData>,
) -> Result<Json<Indicator>, (StatusCode, String)> {
    a001_indicator::service::create(form, identity.actor())
        .await
        .map(Json)
        .map_err(error_response)
}

/// PUT /api/indicator/:id
pub async fn update(
    Path(id): Path<String>,
    identity: CurrentIdentity,
    Json(form): Json<IndicatorFormData>,
) -> Result<Json<Indicator>, (StatusCode, String)> {
    a001_indicator::service::update(&id, form, identity.actor())
        .await
        .map(Json)
        .map_err(error_response)
}

/// DELETE /api/indicator/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, (StatusCode, String)> {
    a001_indicator::service::delete(&id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(error_response)
}
