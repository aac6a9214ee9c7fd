use super::repository;
use crate::domain::a002_indicator_value;
use crate::shared::error::MetricsError;
use contracts::domain::a001_indicator::aggregate::{Indicator, IndicatorFormData, IndicatorId};
use contracts::domain::common::{AggregateId, AggregateRoot};
use uuid::Uuid;

fn parse_id(id: &str) -> Result<IndicatorId, MetricsError> {
    Uuid::parse_str(id)
        .map(IndicatorId::new)
        .map_err(|e| MetricsError::Validation(format!("Invalid indicator id: {}", e)))
}

/// Create an indicator definition
pub async fn create(
    form: IndicatorFormData,
    actor: Option<String>,
) -> Result<Indicator, MetricsError> {
    let mut indicator = Indicator::new_for_insert(form);
    indicator.validate().map_err(MetricsError::Validation)?;
    indicator.metadata.created_by = actor;

    let db = crate::shared::data::db::get_connection();
    repository::insert(db, &indicator).await?;

    Ok(indicator)
}

/// Update an indicator definition in place
pub async fn update(
    id: &str,
    form: IndicatorFormData,
    actor: Option<String>,
) -> Result<Indicator, MetricsError> {
    let indicator_id = parse_id(id)?;

    let db = crate::shared::data::db::get_connection();
    let mut indicator = repository::find_by_id(db, &indicator_id).await?.ok_or_else(|| {
        MetricsError::NotFound(format!("{} {} not found", Indicator::element_name(), id))
    })?;

    indicator.apply(form);
    indicator.validate().map_err(MetricsError::Validation)?;
    indicator.metadata.updated_by = actor;
    indicator.touch_updated();

    repository::update(db, &indicator).await?;

    Ok(indicator)
}

/// Hard delete. Values recorded against the indicator go with it; the normal
/// flow is soft-disable through is_active instead.
pub async fn delete(id: &str) -> Result<(), MetricsError> {
    let indicator_id = parse_id(id)?;

    let db = crate::shared::data::db::get_connection();
    a002_indicator_value::repository::delete_by_indicator(db, &indicator_id.as_string()).await?;
    let removed = repository::delete(db, &indicator_id).await?;
    if removed == 0 {
        return Err(MetricsError::NotFound(format!(
            "{} {} not found",
            Indicator::element_name(),
            id
        )));
    }
    Ok(())
}

pub async fn get_by_id(id: &str) -> Result<Option<Indicator>, MetricsError> {
    let indicator_id = parse_id(id)?;

    let db = crate::shared::data::db::get_connection();
    let indicator = repository::find_by_id(db, &indicator_id).await?;
    Ok(indicator)
}

pub async fn list_all(only_active: bool) -> Result<Vec<Indicator>, MetricsError> {
    let db = crate::shared::data::db::get_connection();
    let indicators = repository::list_all(db, only_active).await?;
    Ok(indicators)
}
