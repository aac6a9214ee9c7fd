use super::repository;
use crate::shared::error::MetricsError;
use contracts::domain::a003_squad::aggregate::{Squad, SquadFormData, SquadId};
use uuid::Uuid;

fn parse_id(id: &str) -> Result<SquadId, MetricsError> {
    Uuid::parse_str(id)
        .map(SquadId::new)
        .map_err(|e| MetricsError::Validation(format!("Invalid squad id: {}", e)))
}

pub async fn create(form: SquadFormData, actor: Option<String>) -> Result<Squad, MetricsError> {
    let mut squad = Squad::new_for_insert(form);
    squad.validate().map_err(MetricsError::Validation)?;
    squad.metadata.created_by = actor;

    let db = crate::shared::data::db::get_connection();
    repository::insert(db, &squad).await?;
    Ok(squad)
}

pub async fn update(
    id: &str,
    form: SquadFormData,
    actor: Option<String>,
) -> Result<Squad, MetricsError> {
    let squad_id = parse_id(id)?;

    let db = crate::shared::data::db::get_connection();
    let mut squad = repository::find_by_id(db, &squad_id)
        .await?
        .ok_or_else(|| MetricsError::NotFound(format!("Squad {} not found", id)))?;

    squad.apply(form);
    squad.validate().map_err(MetricsError::Validation)?;
    squad.metadata.updated_by = actor;
    squad.touch_updated();

    repository::update(db, &squad).await?;
    Ok(squad)
}

pub async fn delete(id: &str) -> Result<(), MetricsError> {
    let squad_id = parse_id(id)?;

    let db = crate::shared::data::db::get_connection();
    let removed = repository::delete(db, &squad_id).await?;
    if removed == 0 {
        return Err(MetricsError::NotFound(format!("Squad {} not found", id)));
    }
    Ok(())
}

pub async fn get_by_id(id: &str) -> Result<Option<Squad>, MetricsError> {
    let squad_id = parse_id(id)?;
    let db = crate::shared::data::db::get_connection();
    Ok(repository::find_by_id(db, &squad_id).await?)
}

pub async fn list_all() -> Result<Vec<Squad>, MetricsError> {
    let db = crate::shared::data::db::get_connection();
    Ok(repository::list_all(db).await?)
}
