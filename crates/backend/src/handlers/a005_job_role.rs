use super::error_response;
use crate::domain::a005_job_role;
use crate::system::auth::extractor::CurrentIdentity;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a005_job_role::aggregate::{JobRole, JobRoleFormData};

/// GET /api/job_role
pub async fn list_all() -> Result<Json<Vec<JobRole>>, (StatusCode, String)> {
    a005_job_role::service::list_all()
        .await
        .map(Json)
        .map_err(error_response)
}

/// GET /api/job_role/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<JobRole>, (StatusCode, String)> {
    match a005_job_role::service::get_by_id(&id).await {
        Ok(Some(role)) => Ok(Json(role)),
        Ok(None) => Err((StatusCode::NOT_FOUND, format!("Job role {} not found", id))),
        Err(err) => Err(error_response(err)),
    }
}

/// POST /api/job_role
pub async fn create(
    identity: CurrentIdentity,
    Json(form): Json<JobRoleFormData>,
) -> Result<Json<JobRole>, (StatusCode, String)> {
    a005_job_role::service::create(form, identity.actor())
        .await
        .map(Json)
        .map_err(error_response)
}

/// PUT /api/job_role/:id
pub async fn update(
    Path(id): Path<String>,
    identity: CurrentIdentity,
    Json(form): Json<JobRoleFormData>,
) -> Result<Json<JobRole>, (StatusCode, String)> {
    a005_job_role::service::update(&id, form, identity.actor())
        .await
        .map(Json)
        .map_err(error_response)
}

/// DELETE /api/job_role/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, (StatusCode, String)> {
    a005_job_role::service::delete(&id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(error_response)
}
