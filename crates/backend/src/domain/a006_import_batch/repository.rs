use chrono::Utc;
use contracts::domain::a006_import_batch::aggregate::{
    ImportBatch, ImportBatchId, ImportBatchStatus,
};
use contracts::domain::common::{AggregateId, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, QueryOrder, Set};
use uuid::Uuid;

mod import_batch {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a006_import_batch")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub filename: Option<String>,
        pub record_count: i32,
        pub success_count: i32,
        pub error_count: i32,
        pub status: String,
        pub errors_json: String,
        pub created_at: Option<chrono::DateTime<chrono::Utc>>,
        pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
        pub created_by: Option<String>,
        pub updated_by: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

impl From<import_batch::Model> for ImportBatch {
    fn from(m: import_batch::Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            created_by: m.created_by,
            updated_by: m.updated_by,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let errors: Vec<String> = serde_json::from_str(&m.errors_json).unwrap_or_default();

        ImportBatch {
            id: ImportBatchId::new(uuid),
            filename: m.filename,
            record_count: m.record_count,
            success_count: m.success_count,
            error_count: m.error_count,
            status: ImportBatchStatus::from_str(&m.status)
                .unwrap_or(ImportBatchStatus::Processing),
            errors,
            metadata,
        }
    }
}

fn to_active_model(b: &ImportBatch) -> import_batch::ActiveModel {
    let errors_json = serde_json::to_string(&b.errors).unwrap_or_else(|_| "[]".to_string());

    import_batch::ActiveModel {
        id: Set(b.id.as_string()),
        filename: Set(b.filename.clone()),
        record_count: Set(b.record_count),
        success_count: Set(b.success_count),
        error_count: Set(b.error_count),
        status: Set(b.status.as_str().to_string()),
        errors_json: Set(errors_json),
        created_at: Set(Some(b.metadata.created_at)),
        updated_at: Set(Some(b.metadata.updated_at)),
        created_by: Set(b.metadata.created_by.clone()),
        updated_by: Set(b.metadata.updated_by.clone()),
    }
}

// ============================================================================
// Repository functions
// ============================================================================

/// Import history, newest first
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<ImportBatch>, DbErr> {
    let models = import_batch::Entity::find()
        .order_by_desc(import_batch::Column::CreatedAt)
        .all(db)
        .await?;
    Ok(models.into_iter().map(|m| m.into()).collect())
}

pub async fn insert(db: &DatabaseConnection, b: &ImportBatch) -> Result<(), DbErr> {
    to_active_model(b).insert(db).await?;
    Ok(())
}

pub async fn update(db: &DatabaseConnection, b: &ImportBatch) -> Result<(), DbErr> {
    import_batch::Entity::update(to_active_model(b))
        .exec(db)
        .await?;
    Ok(())
}
