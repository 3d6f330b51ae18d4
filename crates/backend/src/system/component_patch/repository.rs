use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseTransaction, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sys_component_patch")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub batch_id: String,
    pub source_file: String,
    pub attribute: String,
    pub value: String,
    pub old_value: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub struct NewPatchRow<'a> {
    pub batch_id: &'a str,
    pub source_file: &'a str,
    pub attribute: &'a str,
    pub value: &'a str,
    pub old_value: &'a str,
}

pub async fn insert(txn: &DatabaseTransaction, row: NewPatchRow<'_>) -> Result<(), DbErr> {
    let active = ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        batch_id: Set(row.batch_id.to_string()),
        source_file: Set(row.source_file.to_string()),
        attribute: Set(row.attribute.to_string()),
        value: Set(row.value.to_string()),
        old_value: Set(row.old_value.to_string()),
        created_at: Set(chrono::Utc::now()),
    };
    active.insert(txn).await?;
    Ok(())
}

/// Latest rows first
pub async fn list_recent(conn: &DatabaseConnection, limit: u64) -> Result<Vec<Model>, DbErr> {
    Entity::find()
        .order_by_desc(Column::Id)
        .limit(limit)
        .all(conn)
        .await
}
