use super::repository;
use crate::shared::error::MetricsError;
use contracts::domain::a005_job_role::aggregate::{JobRole, JobRoleFormData, JobRoleId};
use uuid::Uuid;

fn parse_id(id: &str) -> Result<JobRoleId, MetricsError> {
    Uuid::parse_str(id)
        .map(JobRoleId::new)
        .map_err(|e| MetricsError::Validation(format!("Invalid job role id: {}", e)))
}

pub async fn create(form: JobRoleFormData, actor: Option<String>) -> Result<JobRole, MetricsError> {
    let mut role = JobRole::new_for_insert(form);
    role.validate().map_err(MetricsError::Validation)?;
    role.metadata.created_by = actor;

    let db = crate::shared::data::db::get_connection();
    repository::insert(db, &role).await?;
    Ok(role)
}

pub async fn update(
    id: &str,
    form: JobRoleFormData,
    actor: Option<String>,
) -> Result<JobRole, MetricsError> {
    let role_id = parse_id(id)?;

    let db = crate::shared::data::db::get_connection();
    let mut role = repository::find_by_id(db, &role_id)
        .await?
        .ok_or_else(|| MetricsError::NotFound(format!("Job role {} not found", id)))?;

    role.apply(form);
    role.validate().map_err(MetricsError::Validation)?;
    role.metadata.updated_by = actor;
    role.touch_updated();

    repository::update(db, &role).await?;
    Ok(role)
}

pub async fn delete(id: &str) -> Result<(), MetricsError> {
    let role_id = parse_id(id)?;

    let db = crate::shared::data::db::get_connection();
    let removed = repository::delete(db, &role_id).await?;
    if removed == 0 {
        return Err(MetricsError::NotFound(format!("Job role {} not found", id)));
    }
    Ok(())
}

pub async fn get_by_id(id: &str) -> Result<Option<JobRole>, MetricsError> {
    let role_id = parse_id(id)?;
    let db = crate::shared::data::db::get_connection();
    Ok(repository::find_by_id(db, &role_id).await?)
}

pub async fn list_all() -> Result<Vec<JobRole>, MetricsError> {
    let db = crate::shared::data::db::get_connection();
    Ok(repository::list_all(db).await?)
}
