use super::error_response;
use crate::domain::a004_professional;
use crate::system::auth::extractor::CurrentIdentity;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a004_professional::aggregate::{Professional, ProfessionalFormData};

/// GET /api/professional
pub async fn list_all() -> Result<Json<Vec<Professional>>, (StatusCode, String)> {
    a004_professional::service::list_all()
        .await
        .map(Json)
        .map_err(error_response)
}

/// GET /api/professional/:id
pub async fn get_by_id(
    Path(id): Path<String>,
) -> Result<Json<Professional>, (StatusCode, String)> {
    match a004_professional::service::get_by_id(&id).await {
        Ok(Some(professional)) => Ok(Json(professional)),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            format!("Professional {} not found", id),
        )),
        Err(err) => Err(error_response(err)),
    }
}

/// POST /api/professional
pub async fn create(
    identity: CurrentIdentity,
    Json(form): Json<ProfessionalFormData>,
) -> Result<Json<Professional>, (StatusCode, String)> {
    a004_professional::service::create(form, identity.actor())
        .await
        .map(Json)
        .map_err(error_response)
}

/// PUT /api/professional/:id
pub async fn update(
    Path(id): Path<String>,
    identity: CurrentIdentity,
    Json(form): Json<ProfessionalFormData>,
) -> Result<Json<Professional>, (StatusCode, String)> {
    a004_professional::service::update(&id, form, identity.actor())
        .await
        .map(Json)
        .map_err(error_response)
}

/// DELETE /api/professional/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, (StatusCode, String)> {
    a004_professional::service::delete(&id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(error_response)
}
