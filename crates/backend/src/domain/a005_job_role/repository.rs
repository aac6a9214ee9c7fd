use chrono::Utc;
use contracts::domain::a005_job_role::aggregate::{JobRole, JobRoleId};
use contracts::domain::common::{AggregateId, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, QueryOrder, Set};
use uuid::Uuid;

mod job_role {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a005_job_role")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub title: String,
        pub description: Option<String>,
        pub is_management: bool,
        pub created_at: Option<chrono::DateTime<chrono::Utc>>,
        pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
        pub created_by: Option<String>,
        pub updated_by: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

impl From<job_role::Model> for JobRole {
    fn from(m: job_role::Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            created_by: m.created_by,
            updated_by: m.updated_by,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        JobRole {
            id: JobRoleId::new(uuid),
            title: m.title,
            description: m.description,
            is_management: m.is_management,
            metadata,
        }
    }
}

fn to_active_model(r: &JobRole) -> job_role::ActiveModel {
    job_role::ActiveModel {
        id: Set(r.id.as_string()),
        title: Set(r.title.clone()),
        description: Set(r.description.clone()),
        is_management: Set(r.is_management),
        created_at: Set(Some(r.metadata.created_at)),
        updated_at: Set(Some(r.metadata.updated_at)),
        created_by: Set(r.metadata.created_by.clone()),
        updated_by: Set(r.metadata.updated_by.clone()),
    }
}

// ============================================================================
// Repository functions
// ============================================================================

pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<JobRole>, DbErr> {
    let models = job_role::Entity::find()
        .order_by_asc(job_role::Column::Title)
        .all(db)
        .await?;
    Ok(models.into_iter().map(|m| m.into()).collect())
}

pub async fn find_by_id(db: &DatabaseConnection, id: &JobRoleId) -> Result<Option<JobRole>, DbErr> {
    let model = job_role::Entity::find_by_id(id.as_string()).one(db).await?;
    Ok(model.map(|m| m.into()))
}

pub async fn insert(db: &DatabaseConnection, r: &JobRole) -> Result<(), DbErr> {
    to_active_model(r).insert(db).await?;
    Ok(())
}

pub async fn update(db: &DatabaseConnection, r: &JobRole) -> Result<(), DbErr> {
    job_role::Entity::update(to_active_model(r)).exec(db).await?;
    Ok(())
}

pub async fn delete(db: &DatabaseConnection, id: &JobRoleId) -> Result<u64, DbErr> {
    let res = job_role::Entity::delete_by_id(id.as_string())
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}
