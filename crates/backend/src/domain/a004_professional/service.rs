use super::repository;
use crate::shared::error::MetricsError;
use contracts::domain::a004_professional::aggregate::{
    Professional, ProfessionalFormData, ProfessionalId,
};
use uuid::Uuid;

fn parse_id(id: &str) -> Result<ProfessionalId, MetricsError> {
    Uuid::parse_str(id)
        .map(ProfessionalId::new)
        .map_err(|e| MetricsError::Validation(format!("Invalid professional id: {}", e)))
}

pub async fn create(
    form: ProfessionalFormData,
    actor: Option<String>,
) -> Result<Professional, MetricsError> {
    let mut professional = Professional::new_for_insert(form);
    professional.validate().map_err(MetricsError::Validation)?;
    professional.metadata.created_by = actor;

    let db = crate::shared::data::db::get_connection();
    repository::insert(db, &professional).await?;
    Ok(professional)
}

pub async fn update(
    id: &str,
    form: ProfessionalFormData,
    actor: Option<String>,
) -> Result<Professional, MetricsError> {
    let professional_id = parse_id(id)?;

    let db = crate::shared::data::db::get_connection();
    let mut professional = repository::find_by_id(db, &professional_id)
        .await?
        .ok_or_else(|| MetricsError::NotFound(format!("Professional {} not found", id)))?;

    professional.apply(form);
    professional.validate().map_err(MetricsError::Validation)?;
    professional.metadata.updated_by = actor;
    professional.touch_updated();

    repository::update(db, &professional).await?;
    Ok(professional)
}

pub async fn delete(id: &str) -> Result<(), MetricsError> {
    let professional_id = parse_id(id)?;

    let db = crate::shared::data::db::get_connection();
    let removed = repository::delete(db, &professional_id).await?;
    if removed == 0 {
        return Err(MetricsError::NotFound(format!(
            "Professional {} not found",
            id
        )));
    }
    Ok(())
}

pub async fn get_by_id(id: &str) -> Result<Option<Professional>, MetricsError> {
    let professional_id = parse_id(id)?;
    let db = crate::shared::data::db::get_connection();
    Ok(repository::find_by_id(db, &professional_id).await?)
}

pub async fn list_all() -> Result<Vec<Professional>, MetricsError> {
    let db = crate::shared::data::db::get_connection();
    Ok(repository::list_all(db).await?)
}
