use super::repository;
use crate::domain::a001_indicator;
use crate::shared::error::MetricsError;
use chrono::NaiveDate;
use contracts::domain::a001_indicator::aggregate::IndicatorId;
use contracts::domain::a002_indicator_value::aggregate::{
    IndicatorValue, IndicatorValueFormData, IndicatorValueId, ValueFilter,
};
use contracts::domain::common::{AggregateId, EntityMetadata};
use uuid::Uuid;

fn parse_value_id(id: &str) -> Result<IndicatorValueId, MetricsError> {
    Uuid::parse_str(id)
        .map(IndicatorValueId::new)
        .map_err(|e| MetricsError::Validation(format!("Invalid value id: {}", e)))
}

fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, MetricsError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        MetricsError::Validation(format!("{} must be a YYYY-MM-DD date, got '{}'", field, raw))
    })
}

/// Turn a form into an aggregate, enforcing the required-field invariants.
/// Every non-derived field carries over exactly; nothing is coerced between
/// the numeric and text observation channels.
pub fn build_value(
    form: &IndicatorValueFormData,
    actor: Option<String>,
) -> Result<IndicatorValue, MetricsError> {
    if form.indicator_id.trim().is_empty() {
        return Err(MetricsError::Validation(
            "indicator_id is required".to_string(),
        ));
    }
    let indicator_uuid = Uuid::parse_str(&form.indicator_id)
        .map_err(|e| MetricsError::Validation(format!("Invalid indicator_id: {}", e)))?;

    if form.period_start.trim().is_empty() {
        return Err(MetricsError::Validation(
            "period_start is required".to_string(),
        ));
    }
    if form.period_end.trim().is_empty() {
        return Err(MetricsError::Validation(
            "period_end is required".to_string(),
        ));
    }
    let period_start = parse_date("period_start", &form.period_start)?;
    let period_end = parse_date("period_end", &form.period_end)?;
    if period_start > period_end {
        return Err(MetricsError::Validation(format!(
            "period_start {} is after period_end {}",
            period_start, period_end
        )));
    }

    let mut metadata = EntityMetadata::new();
    metadata.created_by = actor;

    Ok(IndicatorValue {
        id: IndicatorValueId::new_v4(),
        indicator_id: IndicatorId::new(indicator_uuid),
        value: form.value,
        text_value: form.text_value.clone(),
        period_type: form.period_type,
        period_start,
        period_end,
        squad_id: form.squad_id.clone(),
        product_name: form.product_name.clone(),
        comparison_value: form.comparison_value,
        comparison_percentage: form.comparison_percentage,
        status: form.status,
        source: form.source,
        import_batch_id: form.import_batch_id.clone(),
        metadata,
        indicator: None,
    })
}

// ============================================================================
// Service functions
// ============================================================================

pub async fn list(filter: ValueFilter) -> Result<Vec<IndicatorValue>, MetricsError> {
    let db = crate::shared::data::db::get_connection();
    let values = repository::list(db, &filter).await?;
    Ok(values)
}

/// Record one observation
pub async fn create(
    form: IndicatorValueFormData,
    actor: Option<String>,
) -> Result<IndicatorValue, MetricsError> {
    let value = build_value(&form, actor)?;

    let db = crate::shared::data::db::get_connection();
    let owner = a001_indicator::repository::find_by_id(db, &value.indicator_id).await?;
    if owner.is_none() {
        return Err(MetricsError::NotFound(format!(
            "Indicator {} not found",
            form.indicator_id
        )));
    }

    repository::insert(db, &value).await?;
    Ok(value)
}

/// Persist a parsed batch in one all-or-nothing insert. Any invalid record
/// fails the whole call and nothing is written; partial acceptance happens
/// one layer up, in the import parser, never here.
pub async fn bulk_create(
    forms: &[IndicatorValueFormData],
    actor: Option<String>,
) -> Result<Vec<IndicatorValue>, MetricsError> {
    let mut values = Vec::with_capacity(forms.len());
    for form in forms {
        values.push(build_value(form, actor.clone())?);
    }

    let db = crate::shared::data::db::get_connection();
    for value in &values {
        let owner = a001_indicator::repository::find_by_id(db, &value.indicator_id).await?;
        if owner.is_none() {
            return Err(MetricsError::NotFound(format!(
                "Indicator {} not found",
                value.indicator_id.0
            )));
        }
    }

    repository::insert_many(db, &values).await?;
    Ok(values)
}

/// Update an observation in place. The owning indicator reference is
/// immutable after creation.
pub async fn update(
    id: &str,
    form: IndicatorValueFormData,
    actor: Option<String>,
) -> Result<IndicatorValue, MetricsError> {
    let value_id = parse_value_id(id)?;

    let db = crate::shared::data::db::get_connection();
    let existing = repository::find_by_id(db, &value_id)
        .await?
        .ok_or_else(|| MetricsError::NotFound(format!("Indicator value {} not found", id)))?;

    if form.indicator_id != existing.indicator_id.as_string() {
        return Err(MetricsError::Validation(
            "indicator_id is immutable after creation".to_string(),
        ));
    }

    let mut updated = build_value(&form, None)?;
    updated.id = existing.id;
    updated.metadata.created_at = existing.metadata.created_at;
    updated.metadata.created_by = existing.metadata.created_by.clone();
    updated.metadata.updated_by = actor;
    updated.touch_updated();

    repository::update(db, &updated).await?;
    Ok(updated)
}

pub async fn delete(id: &str) -> Result<(), MetricsError> {
    let value_id = parse_value_id(id)?;

    let db = crate::shared::data::db::get_connection();
    let removed = repository::delete(db, &value_id).await?;
    if removed == 0 {
        return Err(MetricsError::NotFound(format!(
            "Indicator value {} not found",
            id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_indicator_value::aggregate::{
        PeriodType, ValueSource, ValueStatus,
    };

    fn form() -> IndicatorValueFormData {
        IndicatorValueFormData {
            indicator_id: Uuid::new_v4().to_string(),
            value: Some(4.5),
            text_value: None,
            period_type: PeriodType::Mensal,
            period_start: "2024-01-01".to_string(),
            period_end: "2024-01-31".to_string(),
            squad_id: None,
            squad_name: Some("Squad Alpha".to_string()),
            product_name: Some("WK.app".to_string()),
            comparison_value: Some(5.2),
            comparison_percentage: None,
            status: ValueStatus::Excellent,
            source: ValueSource::Import,
            import_batch_id: None,
        }
    }

    #[test]
    fn test_build_preserves_every_field() {
        let f = form();
        let value = build_value(&f, Some("user-1".to_string())).unwrap();

        assert_eq!(value.indicator_id.as_string(), f.indicator_id);
        assert_eq!(value.value, Some(4.5));
        assert_eq!(value.text_value, None);
        assert_eq!(value.period_type, PeriodType::Mensal);
        assert_eq!(value.period_start.to_string(), "2024-01-01");
        assert_eq!(value.period_end.to_string(), "2024-01-31");
        assert_eq!(value.product_name.as_deref(), Some("WK.app"));
        assert_eq!(value.comparison_value, Some(5.2));
        assert_eq!(value.comparison_percentage, None);
        assert_eq!(value.status, ValueStatus::Excellent);
        assert_eq!(value.source, ValueSource::Import);
        assert_eq!(value.metadata.created_by.as_deref(), Some("user-1"));
    }

    #[test]
    fn test_text_value_is_not_coerced() {
        let mut f = form();
        f.value = None;
        f.text_value = Some("99.5".to_string());
        let value = build_value(&f, None).unwrap();
        // A numeric-looking text observation stays text
        assert_eq!(value.value, None);
        assert_eq!(value.text_value.as_deref(), Some("99.5"));
    }

    #[test]
    fn test_missing_required_fields_rejected() {
        let mut f = form();
        f.indicator_id = "".to_string();
        assert!(matches!(
            build_value(&f, None),
            Err(MetricsError::Validation(_))
        ));

        let mut f = form();
        f.period_start = "".to_string();
        assert!(matches!(
            build_value(&f, None),
            Err(MetricsError::Validation(_))
        ));

        let mut f = form();
        f.period_end = "31-01-2024".to_string();
        assert!(matches!(
            build_value(&f, None),
            Err(MetricsError::Validation(_))
        ));
    }

    #[test]
    fn test_inverted_period_rejected() {
        let mut f = form();
        f.period_start = "2024-02-01".to_string();
        f.period_end = "2024-01-31".to_string();
        assert!(matches!(
            build_value(&f, None),
            Err(MetricsError::Validation(_))
        ));
    }
}
