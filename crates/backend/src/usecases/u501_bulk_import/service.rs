use super::parser;
use crate::domain::{a001_indicator, a002_indicator_value, a003_squad, a006_import_batch};
use crate::shared::error::MetricsError;
use contracts::domain::a002_indicator_value::aggregate::IndicatorValueFormData;
use contracts::domain::a006_import_batch::aggregate::{
    ImportBatch, ImportBatchId, ImportBatchStatus,
};
use contracts::domain::common::{AggregateId, EntityMetadata};
use contracts::usecases::u501_bulk_import::{BulkImportReport, BulkImportRequest};
use std::collections::HashMap;

/// Resolve human-entered squad names to squad ids, case-insensitively.
/// A name with no match stays unresolved; that is not a row error.
async fn resolve_squads(records: &mut [IndicatorValueFormData]) -> Result<(), MetricsError> {
    let db = crate::shared::data::db::get_connection();
    let mut cache: HashMap<String, Option<String>> = HashMap::new();

    for record in records.iter_mut() {
        let Some(name) = record.squad_name.clone() else {
            continue;
        };
        let key = name.to_lowercase();
        let resolved = match cache.get(&key) {
            Some(hit) => hit.clone(),
            None => {
                let squad = a003_squad::repository::find_by_name(db, &name).await?;
                let id = squad.map(|s| s.to_string_id());
                cache.insert(key, id.clone());
                id
            }
        };
        record.squad_id = resolved;
    }
    Ok(())
}

/// Run a bulk import end to end: parse, resolve squads, record the batch and
/// submit the surviving rows as one all-or-nothing insert.
///
/// Row-level failures are data, not errors: the report carries them back and
/// the caller decides what to make of a partial outcome. Zero valid rows is
/// reported with success_count 0, distinct from a parse that found rows but
/// whose batch insert failed, which is a hard error.
pub async fn import(
    request: BulkImportRequest,
    actor: Option<String>,
) -> Result<BulkImportReport, MetricsError> {
    let known = a001_indicator::service::list_all(true).await?;
    let outcome = parser::parse(&request.content, &known);

    if outcome.records.is_empty() {
        return Ok(BulkImportReport {
            batch_id: None,
            success_count: 0,
            error_count: outcome.errors.len(),
            errors: outcome.errors,
        });
    }

    let mut records = outcome.records;
    resolve_squads(&mut records).await?;

    let db = crate::shared::data::db::get_connection();

    let mut batch = ImportBatch {
        id: ImportBatchId::new_v4(),
        filename: request.filename,
        record_count: records.len() as i32,
        success_count: 0,
        error_count: outcome.errors.len() as i32,
        status: ImportBatchStatus::Processing,
        errors: outcome.errors.clone(),
        metadata: EntityMetadata::new(),
    };
    batch.metadata.created_by = actor.clone();
    a006_import_batch::repository::insert(db, &batch).await?;

    for record in records.iter_mut() {
        record.import_batch_id = Some(batch.id.as_string());
    }

    match a002_indicator_value::service::bulk_create(&records, actor).await {
        Ok(created) => {
            batch.success_count = created.len() as i32;
            batch.status = ImportBatchStatus::Completed;
            batch.metadata.touch();
            a006_import_batch::repository::update(db, &batch).await?;

            Ok(BulkImportReport {
                batch_id: Some(batch.id.as_string()),
                success_count: created.len(),
                error_count: outcome.errors.len(),
                errors: outcome.errors,
            })
        }
        Err(err) => {
            batch.status = ImportBatchStatus::Failed;
            batch.errors.push(err.to_string());
            batch.error_count = batch.errors.len() as i32;
            batch.metadata.touch();
            a006_import_batch::repository::update(db, &batch).await?;
            Err(err)
        }
    }
}

/// Import history for the data screen
pub async fn list_batches() -> Result<Vec<contracts::domain::a006_import_batch::aggregate::ImportBatch>, MetricsError> {
    let db = crate::shared::data::db::get_connection();
    Ok(a006_import_batch::repository::list_all(db).await?)
}
