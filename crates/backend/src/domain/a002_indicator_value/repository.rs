use chrono::{NaiveDate, Utc};
use contracts::domain::a001_indicator::aggregate::IndicatorId;
use contracts::domain::a002_indicator_value::aggregate::{
    IndicatorValue, IndicatorValueId, PeriodType, ValueFilter, ValueSource, ValueStatus,
};
use contracts::domain::common::{AggregateId, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait};
use uuid::Uuid;

use crate::domain::a001_indicator::repository::indicator;

pub(crate) mod indicator_value {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a002_indicator_value")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub indicator_id: String,
        pub value: Option<f64>,
        pub text_value: Option<String>,
        pub period_type: String,
        pub period_start: String,
        pub period_end: String,
        pub squad_id: Option<String>,
        pub product_name: Option<String>,
        pub comparison_value: Option<f64>,
        pub comparison_percentage: Option<f64>,
        pub status: String,
        pub source: String,
        pub import_batch_id: Option<String>,
        pub created_at: Option<chrono::DateTime<chrono::Utc>>,
        pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
        pub created_by: Option<String>,
        pub updated_by: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "crate::domain::a001_indicator::repository::indicator::Entity",
            from = "Column::IndicatorId",
            to = "crate::domain::a001_indicator::repository::indicator::Column::Id"
        )]
        Indicator,
    }

    impl Related<crate::domain::a001_indicator::repository::indicator::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Indicator.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

fn model_into_value(
    m: indicator_value::Model,
    owner: Option<indicator::Model>,
) -> IndicatorValue {
    let metadata = EntityMetadata {
        created_at: m.created_at.unwrap_or_else(Utc::now),
        updated_at: m.updated_at.unwrap_or_else(Utc::now),
        created_by: m.created_by,
        updated_by: m.updated_by,
    };

    let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
    let indicator_uuid = Uuid::parse_str(&m.indicator_id).unwrap_or_else(|_| Uuid::new_v4());

    IndicatorValue {
        id: IndicatorValueId::new(uuid),
        indicator_id: IndicatorId::new(indicator_uuid),
        value: m.value,
        text_value: m.text_value,
        period_type: PeriodType::from_str(&m.period_type).unwrap_or(PeriodType::Mensal),
        period_start: NaiveDate::parse_from_str(&m.period_start, "%Y-%m-%d")
            .unwrap_or_default(),
        period_end: NaiveDate::parse_from_str(&m.period_end, "%Y-%m-%d").unwrap_or_default(),
        squad_id: m.squad_id,
        product_name: m.product_name,
        comparison_value: m.comparison_value,
        comparison_percentage: m.comparison_percentage,
        status: ValueStatus::from_str(&m.status).unwrap_or(ValueStatus::Neutral),
        source: ValueSource::from_str(&m.source).unwrap_or(ValueSource::Manual),
        import_batch_id: m.import_batch_id,
        metadata,
        indicator: owner.map(|o| o.into()),
    }
}

fn to_active_model(v: &IndicatorValue) -> indicator_value::ActiveModel {
    indicator_value::ActiveModel {
        id: Set(v.id.as_string()),
        indicator_id: Set(v.indicator_id.as_string()),
        value: Set(v.value),
        text_value: Set(v.text_value.clone()),
        period_type: Set(v.period_type.as_str().to_string()),
        period_start: Set(v.period_start.format("%Y-%m-%d").to_string()),
        period_end: Set(v.period_end.format("%Y-%m-%d").to_string()),
        squad_id: Set(v.squad_id.clone()),
        product_name: Set(v.product_name.clone()),
        comparison_value: Set(v.comparison_value),
        comparison_percentage: Set(v.comparison_percentage),
        status: Set(v.status.as_str().to_string()),
        source: Set(v.source.as_str().to_string()),
        import_batch_id: Set(v.import_batch_id.clone()),
        created_at: Set(Some(v.metadata.created_at)),
        updated_at: Set(Some(v.metadata.updated_at)),
        created_by: Set(v.metadata.created_by.clone()),
        updated_by: Set(v.metadata.updated_by.clone()),
    }
}

// ============================================================================
// Repository functions
// ============================================================================

/// List values matching the filter, newest period first, each joined with its
/// owning indicator. Present filter keys narrow the result with AND semantics.
pub async fn list(
    db: &DatabaseConnection,
    filter: &ValueFilter,
) -> Result<Vec<IndicatorValue>, DbErr> {
    let mut query = indicator_value::Entity::find()
        .find_also_related(indicator::Entity)
        .order_by_desc(indicator_value::Column::PeriodStart);

    if let Some(indicator_id) = &filter.indicator_id {
        query = query.filter(indicator_value::Column::IndicatorId.eq(indicator_id.clone()));
    }
    if let Some(squad_id) = &filter.squad_id {
        query = query.filter(indicator_value::Column::SquadId.eq(squad_id.clone()));
    }
    if let Some(min) = filter.period_start_min {
        query = query.filter(
            indicator_value::Column::PeriodStart.gte(min.format("%Y-%m-%d").to_string()),
        );
    }
    if let Some(max) = filter.period_end_max {
        query = query
            .filter(indicator_value::Column::PeriodEnd.lte(max.format("%Y-%m-%d").to_string()));
    }

    let rows = query.all(db).await?;
    Ok(rows
        .into_iter()
        .map(|(m, owner)| model_into_value(m, owner))
        .collect())
}

pub async fn find_by_id(
    db: &DatabaseConnection,
    id: &IndicatorValueId,
) -> Result<Option<IndicatorValue>, DbErr> {
    let row = indicator_value::Entity::find_by_id(id.as_string())
        .find_also_related(indicator::Entity)
        .one(db)
        .await?;
    Ok(row.map(|(m, owner)| model_into_value(m, owner)))
}

pub async fn insert(db: &DatabaseConnection, value: &IndicatorValue) -> Result<(), DbErr> {
    to_active_model(value).insert(db).await?;
    Ok(())
}

/// Single batch insert inside one transaction. If any row is rejected by the
/// store, none are persisted.
pub async fn insert_many(
    db: &DatabaseConnection,
    values: &[IndicatorValue],
) -> Result<(), DbErr> {
    if values.is_empty() {
        return Ok(());
    }
    let txn = db.begin().await?;
    indicator_value::Entity::insert_many(values.iter().map(to_active_model))
        .exec(&txn)
        .await?;
    txn.commit().await?;
    Ok(())
}

pub async fn update(db: &DatabaseConnection, value: &IndicatorValue) -> Result<(), DbErr> {
    indicator_value::Entity::update(to_active_model(value))
        .exec(db)
        .await?;
    Ok(())
}

pub async fn delete(db: &DatabaseConnection, id: &IndicatorValueId) -> Result<u64, DbErr> {
    let res = indicator_value::Entity::delete_by_id(id.as_string())
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

/// Remove every value owned by an indicator; used by the indicator hard delete
pub async fn delete_by_indicator(
    db: &DatabaseConnection,
    indicator_id: &str,
) -> Result<u64, DbErr> {
    let res = indicator_value::Entity::delete_many()
        .filter(indicator_value::Column::IndicatorId.eq(indicator_id))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}
