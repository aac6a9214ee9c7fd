use chrono::Utc;
use contracts::dashboards::d400_dashboard_data::{DashboardData, DASHBOARD_CONFIG_KEY};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{EntityTrait, Set};

mod dashboard_data {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "d400_dashboard_data")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub data: String,
        pub created_at: Option<chrono::DateTime<chrono::Utc>>,
        pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Read the single document row, when it exists and parses
pub async fn get(db: &DatabaseConnection) -> Result<Option<DashboardData>, DbErr> {
    let model = dashboard_data::Entity::find_by_id(DASHBOARD_CONFIG_KEY.to_string())
        .one(db)
        .await?;
    Ok(model.and_then(|m| serde_json::from_str(&m.data).ok()))
}

/// Replace the document payload at the fixed key, creating the row lazily
pub async fn upsert(db: &DatabaseConnection, data: &DashboardData) -> Result<(), DbErr> {
    let payload = serde_json::to_string(data)
        .map_err(|e| DbErr::Custom(format!("dashboard payload serialization: {}", e)))?;
    let now = Utc::now();

    let model = dashboard_data::ActiveModel {
        id: Set(DASHBOARD_CONFIG_KEY.to_string()),
        data: Set(payload),
        created_at: Set(Some(now)),
        updated_at: Set(Some(now)),
    };

    dashboard_data::Entity::insert(model)
        .on_conflict(
            OnConflict::column(dashboard_data::Column::Id)
                .update_columns([
                    dashboard_data::Column::Data,
                    dashboard_data::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec(db)
        .await?;
    Ok(())
}
