use super::error_response;
use crate::domain::a003_squad;
use crate::system::auth::extractor::CurrentIdentity;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a003_squad::aggregate::{Squad, SquadFormData};

/// GET /api/squad
pub async fn list_all() -> Result<Json<Vec<Squad>>, (StatusCode, String)> {
    a003_squad::service::list_all()
        .await
        .map(Json)
        .map_err(error_response)
}

/// GET /api/squad/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Squad>, (StatusCode, String)> {
    match a003_squad::service::get_by_id(&id).await {
        Ok(Some(squad)) => Ok(Json(squad)),
        Ok(None) => Err((StatusCode::NOT_FOUND, format!("Squad {} not found", id))),
        Err(err) => Err(error_response(err)),
    }
}

/// POST /api/squad
pub async fn create(
    identity: CurrentIdentity,
    Json(form): Json<SquadFormData>,
) -> Result<Json<Squad>, (StatusCode, String)> {
    a003_squad::service::create(form, identity.actor())
        .await
        .map(Json)
        .map_err(error_response)
}

/// PUT /api/squad/:id
pub async fn update(
    Path(id): Path<String>,
    identity: CurrentIdentity,
    Json(form): Json<SquadFormData>,
) -> Result<Json<Squad>, (StatusCode, String)> {
    a003_squad::service::update(&id, form, identity.actor())
        .await
        .map(Json)
        .map_err(error_response)
}

/// DELETE /api/squad/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, (StatusCode, String)> {
    a003_squad::service::delete(&id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(error_response)
}
