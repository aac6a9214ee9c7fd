use chrono::Utc;
use contracts::domain::a004_professional::aggregate::{
    Professional, ProfessionalId, ProfileType,
};
use contracts::domain::common::{AggregateId, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, QueryOrder, Set};
use uuid::Uuid;

mod professional {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a004_professional")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub profile_id: Option<String>,
        pub name: String,
        pub email: String,
        pub job_role: String,
        pub squad_id: Option<String>,
        pub seniority: String,
        pub profile_type: String,
        pub avatar: Option<String>,
        pub manager_id: Option<String>,
        pub managed_squads_json: String,
        pub created_at: Option<chrono::DateTime<chrono::Utc>>,
        pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
        pub created_by: Option<String>,
        pub updated_by: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

impl From<professional::Model> for Professional {
    fn from(m: professional::Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            created_by: m.created_by,
            updated_by: m.updated_by,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let managed_squads: Vec<String> =
            serde_json::from_str(&m.managed_squads_json).unwrap_or_default();

        Professional {
            id: ProfessionalId::new(uuid),
            profile_id: m.profile_id,
            name: m.name,
            email: m.email,
            job_role: m.job_role,
            squad_id: m.squad_id,
            seniority: m.seniority,
            profile_type: ProfileType::from_str(&m.profile_type)
                .unwrap_or(ProfileType::Colaborador),
            avatar: m.avatar,
            manager_id: m.manager_id,
            managed_squads,
            metadata,
        }
    }
}

fn to_active_model(p: &Professional) -> professional::ActiveModel {
    let managed_squads_json =
        serde_json::to_string(&p.managed_squads).unwrap_or_else(|_| "[]".to_string());

    professional::ActiveModel {
        id: Set(p.id.as_string()),
        profile_id: Set(p.profile_id.clone()),
        name: Set(p.name.clone()),
        email: Set(p.email.clone()),
        job_role: Set(p.job_role.clone()),
        squad_id: Set(p.squad_id.clone()),
        seniority: Set(p.seniority.clone()),
        profile_type: Set(p.profile_type.as_str().to_string()),
        avatar: Set(p.avatar.clone()),
        manager_id: Set(p.manager_id.clone()),
        managed_squads_json: Set(managed_squads_json),
        created_at: Set(Some(p.metadata.created_at)),
        updated_at: Set(Some(p.metadata.updated_at)),
        created_by: Set(p.metadata.created_by.clone()),
        updated_by: Set(p.metadata.updated_by.clone()),
    }
}

// ============================================================================
// Repository functions
// ============================================================================

pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Professional>, DbErr> {
    let models = professional::Entity::find()
        .order_by_asc(professional::Column::Name)
        .all(db)
        .await?;
    Ok(models.into_iter().map(|m| m.into()).collect())
}

pub async fn find_by_id(
    db: &DatabaseConnection,
    id: &ProfessionalId,
) -> Result<Option<Professional>, DbErr> {
    let model = professional::Entity::find_by_id(id.as_string())
        .one(db)
        .await?;
    Ok(model.map(|m| m.into()))
}

pub async fn insert(db: &DatabaseConnection, p: &Professional) -> Result<(), DbErr> {
    to_active_model(p).insert(db).await?;
    Ok(())
}

pub async fn update(db: &DatabaseConnection, p: &Professional) -> Result<(), DbErr> {
    professional::Entity::update(to_active_model(p))
        .exec(db)
        .await?;
    Ok(())
}

pub async fn delete(db: &DatabaseConnection, id: &ProfessionalId) -> Result<u64, DbErr> {
    let res = professional::Entity::delete_by_id(id.as_string())
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}
