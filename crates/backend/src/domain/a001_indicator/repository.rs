use chrono::Utc;
use contracts::domain::a001_indicator::aggregate::{Indicator, IndicatorId, IndicatorType};
use contracts::domain::common::{AggregateId, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

// Entity module is crate-visible so a002 can declare its belongs_to relation
pub(crate) mod indicator {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a001_indicator")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub is_active: bool,
        pub is_kr: bool,
        pub priority: i32,
        pub name: String,
        pub acronym: String,
        pub indicator_type: Option<String>,
        pub category: String,
        pub description: Option<String>,
        pub objective: Option<String>,
        pub calculation_formula: Option<String>,
        pub action_when_bad: Option<String>,
        pub result_when_good: Option<String>,
        pub suggested_target: Option<String>,
        pub default_granularity: Option<String>,
        pub segmentation: Option<String>,
        pub integration_source: Option<String>,
        pub base_query: Option<String>,
        pub created_at: Option<chrono::DateTime<chrono::Utc>>,
        pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
        pub created_by: Option<String>,
        pub updated_by: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

impl From<indicator::Model> for Indicator {
    fn from(m: indicator::Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            created_by: m.created_by,
            updated_by: m.updated_by,
        };

        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        let indicator_type = m
            .indicator_type
            .as_deref()
            .and_then(|s| IndicatorType::from_str(s).ok());

        Indicator {
            id: IndicatorId::new(uuid),
            is_active: m.is_active,
            is_kr: m.is_kr,
            priority: m.priority,
            name: m.name,
            acronym: m.acronym,
            indicator_type,
            category: m.category,
            description: m.description,
            objective: m.objective,
            calculation_formula: m.calculation_formula,
            action_when_bad: m.action_when_bad,
            result_when_good: m.result_when_good,
            suggested_target: m.suggested_target,
            default_granularity: m.default_granularity,
            segmentation: m.segmentation,
            integration_source: m.integration_source,
            base_query: m.base_query,
            metadata,
        }
    }
}

fn to_active_model(ind: &Indicator) -> indicator::ActiveModel {
    indicator::ActiveModel {
        id: Set(ind.id.as_string()),
        is_active: Set(ind.is_active),
        is_kr: Set(ind.is_kr),
        priority: Set(ind.priority),
        name: Set(ind.name.clone()),
        acronym: Set(ind.acronym.clone()),
        indicator_type: Set(ind.indicator_type.map(|t| t.as_str().to_string())),
        category: Set(ind.category.clone()),
        description: Set(ind.description.clone()),
        objective: Set(ind.objective.clone()),
        calculation_formula: Set(ind.calculation_formula.clone()),
        action_when_bad: Set(ind.action_when_bad.clone()),
        result_when_good: Set(ind.result_when_good.clone()),
        suggested_target: Set(ind.suggested_target.clone()),
        default_granularity: Set(ind.default_granularity.clone()),
        segmentation: Set(ind.segmentation.clone()),
        integration_source: Set(ind.integration_source.clone()),
        base_query: Set(ind.base_query.clone()),
        created_at: Set(Some(ind.metadata.created_at)),
        updated_at: Set(Some(ind.metadata.updated_at)),
        created_by: Set(ind.metadata.created_by.clone()),
        updated_by: Set(ind.metadata.updated_by.clone()),
    }
}

// ============================================================================
// Repository functions
// ============================================================================

/// List indicators, optionally only the active ones.
/// Ordered by priority descending, then name, so listings are deterministic.
pub async fn list_all(
    db: &DatabaseConnection,
    only_active: bool,
) -> Result<Vec<Indicator>, DbErr> {
    let mut query = indicator::Entity::find()
        .order_by_desc(indicator::Column::Priority)
        .order_by_asc(indicator::Column::Name);

    if only_active {
        query = query.filter(indicator::Column::IsActive.eq(true));
    }

    let models = query.all(db).await?;
    Ok(models.into_iter().map(|m| m.into()).collect())
}

pub async fn find_by_id(
    db: &DatabaseConnection,
    id: &IndicatorId,
) -> Result<Option<Indicator>, DbErr> {
    let model = indicator::Entity::find_by_id(id.as_string()).one(db).await?;
    Ok(model.map(|m| m.into()))
}

pub async fn insert(db: &DatabaseConnection, ind: &Indicator) -> Result<(), DbErr> {
    to_active_model(ind).insert(db).await?;
    Ok(())
}

pub async fn update(db: &DatabaseConnection, ind: &Indicator) -> Result<(), DbErr> {
    indicator::Entity::update(to_active_model(ind))
        .exec(db)
        .await?;
    Ok(())
}

/// Hard delete. Dependent values are removed by the caller first.
pub async fn delete(db: &DatabaseConnection, id: &IndicatorId) -> Result<u64, DbErr> {
    let res = indicator::Entity::delete_by_id(id.as_string())
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}
