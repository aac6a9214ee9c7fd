use chrono::Utc;
use contracts::domain::a003_squad::aggregate::{Squad, SquadId};
use contracts::domain::common::{AggregateId, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, QueryOrder, Set};
use uuid::Uuid;

mod squad {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a003_squad")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub name: String,
        pub area: String,
        pub description: String,
        pub manager_id: Option<String>,
        pub sort_order: i32,
        pub created_at: Option<chrono::DateTime<chrono::Utc>>,
        pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
        pub created_by: Option<String>,
        pub updated_by: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

impl From<squad::Model> for Squad {
    fn from(m: squad::Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            created_by: m.created_by,
            updated_by: m.updated_by,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Squad {
            id: SquadId::new(uuid),
            name: m.name,
            area: m.area,
            description: m.description,
            manager_id: m.manager_id,
            sort_order: m.sort_order,
            metadata,
        }
    }
}

fn to_active_model(s: &Squad) -> squad::ActiveModel {
    squad::ActiveModel {
        id: Set(s.id.as_string()),
        name: Set(s.name.clone()),
        area: Set(s.area.clone()),
        description: Set(s.description.clone()),
        manager_id: Set(s.manager_id.clone()),
        sort_order: Set(s.sort_order),
        created_at: Set(Some(s.metadata.created_at)),
        updated_at: Set(Some(s.metadata.updated_at)),
        created_by: Set(s.metadata.created_by.clone()),
        updated_by: Set(s.metadata.updated_by.clone()),
    }
}

// ============================================================================
// Repository functions
// ============================================================================

/// Organogram order: explicit position first, then name
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Squad>, DbErr> {
    let models = squad::Entity::find()
        .order_by_asc(squad::Column::SortOrder)
        .order_by_asc(squad::Column::Name)
        .all(db)
        .await?;
    Ok(models.into_iter().map(|m| m.into()).collect())
}

pub async fn find_by_id(db: &DatabaseConnection, id: &SquadId) -> Result<Option<Squad>, DbErr> {
    let model = squad::Entity::find_by_id(id.as_string()).one(db).await?;
    Ok(model.map(|m| m.into()))
}

/// Case-insensitive name lookup, used by the bulk import to resolve
/// human-entered squad names
pub async fn find_by_name(db: &DatabaseConnection, name: &str) -> Result<Option<Squad>, DbErr> {
    let models = squad::Entity::find().all(db).await?;
    Ok(models
        .into_iter()
        .find(|m| m.name.eq_ignore_ascii_case(name))
        .map(|m| m.into()))
}

pub async fn insert(db: &DatabaseConnection, s: &Squad) -> Result<(), DbErr> {
    to_active_model(s).insert(db).await?;
    Ok(())
}

pub async fn update(db: &DatabaseConnection, s: &Squad) -> Result<(), DbErr> {
    squad::Entity::update(to_active_model(s)).exec(db).await?;
    Ok(())
}

pub async fn delete(db: &DatabaseConnection, id: &SquadId) -> Result<u64, DbErr> {
    let res = squad::Entity::delete_by_id(id.as_string()).exec(db).await?;
    Ok(res.rows_affected)
}
