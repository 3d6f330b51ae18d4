use chrono::Utc;
use contracts::domain::a001_content::aggregate::{ContentId, ContentRecord, ContentStatus};
use contracts::domain::common::{AggregateId, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_content")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub content_type: String,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub body: String,
    pub excerpt: Option<String>,
    pub category_id: Option<String>,
    pub status: String,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ContentRecord {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            version: m.version,
        };
        let id = ContentId::from_string(&m.id).unwrap_or_else(|_| ContentId::new_v4());

        ContentRecord {
            id,
            content_type: m.content_type,
            title: m.title,
            slug: m.slug,
            body: m.body,
            excerpt: m.excerpt,
            category_id: m.category_id,
            status: m.status.parse().unwrap_or_default(),
            seo_title: m.seo_title,
            seo_description: m.seo_description,
            metadata,
        }
    }
}

fn to_active(record: &ContentRecord) -> ActiveModel {
    ActiveModel {
        id: Set(record.to_string_id()),
        content_type: Set(record.content_type.clone()),
        title: Set(record.title.clone()),
        slug: Set(record.slug.clone()),
        body: Set(record.body.clone()),
        excerpt: Set(record.excerpt.clone()),
        category_id: Set(record.category_id.clone()),
        status: Set(record.status.as_str().to_string()),
        seo_title: Set(record.seo_title.clone()),
        seo_description: Set(record.seo_description.clone()),
        created_at: Set(Some(record.metadata.created_at)),
        updated_at: Set(Some(record.metadata.updated_at)),
        version: Set(record.metadata.version),
    }
}

pub async fn list_by_type(
    conn: &DatabaseConnection,
    content_type: Option<&str>,
) -> anyhow::Result<Vec<ContentRecord>> {
    let mut query = Entity::find();
    if let Some(content_type) = content_type {
        query = query.filter(Column::ContentType.eq(content_type));
    }
    let mut items: Vec<ContentRecord> = query
        .all(conn)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    // Newest first
    items.sort_by(|a, b| b.metadata.created_at.cmp(&a.metadata.created_at));
    Ok(items)
}

pub async fn list_published(conn: &DatabaseConnection) -> anyhow::Result<Vec<ContentRecord>> {
    let items = Entity::find()
        .filter(Column::Status.eq(ContentStatus::Published.as_str()))
        .all(conn)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(conn: &DatabaseConnection, id: Uuid) -> anyhow::Result<Option<ContentRecord>> {
    let result = Entity::find_by_id(id.to_string()).one(conn).await?;
    Ok(result.map(Into::into))
}

pub async fn get_by_slug(conn: &DatabaseConnection, slug: &str) -> anyhow::Result<Option<ContentRecord>> {
    let result = Entity::find()
        .filter(Column::Slug.eq(slug))
        .one(conn)
        .await?;
    Ok(result.map(Into::into))
}

/// Raw insert; unique-constraint failures surface as `DbErr`.
pub async fn insert(conn: &DatabaseConnection, record: &ContentRecord) -> Result<Uuid, DbErr> {
    to_active(record).insert(conn).await?;
    Ok(record.id.value())
}

pub async fn update(conn: &DatabaseConnection, record: &ContentRecord) -> Result<(), DbErr> {
    let mut active = to_active(record);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn).await?;
    Ok(())
}

pub async fn delete(conn: &DatabaseConnection, id: Uuid) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id.to_string()).exec(conn).await?;
    Ok(result.rows_affected > 0)
}

pub async fn count(conn: &DatabaseConnection, status: Option<ContentStatus>) -> anyhow::Result<u64> {
    let mut query = Entity::find();
    if let Some(status) = status {
        query = query.filter(Column::Status.eq(status.as_str()));
    }
    Ok(query.count(conn).await?)
}
