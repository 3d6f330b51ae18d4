use super::error::ContentError;
use super::repository;
use contracts::domain::a001_content::aggregate::{
    ContentDto, ContentRecord, ContentStats, ContentStatus,
};
use sea_orm::{DatabaseConnection, DbErr, SqlErr};
use uuid::Uuid;

/// Unique index violations become `DuplicateSlug`; `slug` is the only unique
/// column besides the primary key.
fn map_write_error(err: DbErr, slug: &str) -> ContentError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ContentError::DuplicateSlug(slug.to_string()),
        _ => ContentError::Storage(err.into()),
    }
}

/// Body is stored sanitized
fn sanitize(record: &mut ContentRecord) {
    record.body = ammonia::clean(&record.body);
}

/// Создание новой записи
pub async fn create(conn: &DatabaseConnection, dto: ContentDto) -> Result<ContentRecord, ContentError> {
    let mut aggregate = ContentRecord::new_for_insert(&dto);

    // Валидация
    aggregate.validate().map_err(ContentError::Validation)?;

    if repository::get_by_slug(conn, &aggregate.slug).await?.is_some() {
        return Err(ContentError::DuplicateSlug(aggregate.slug));
    }

    // Before write
    sanitize(&mut aggregate);
    aggregate.before_write();

    repository::insert(conn, &aggregate)
        .await
        .map_err(|e| map_write_error(e, &aggregate.slug))?;
    tracing::info!(
        "Created content {} ({}/{})",
        aggregate.to_string_id(),
        aggregate.content_type,
        aggregate.slug
    );
    Ok(aggregate)
}

/// Обновление существующей записи
pub async fn update(
    conn: &DatabaseConnection,
    id: Uuid,
    dto: ContentDto,
) -> Result<ContentRecord, ContentError> {
    let mut aggregate = repository::get_by_id(conn, id)
        .await?
        .ok_or_else(|| ContentError::NotFound(id.to_string()))?;

    aggregate.update(&dto);

    // Валидация
    aggregate.validate().map_err(ContentError::Validation)?;

    if let Some(other) = repository::get_by_slug(conn, &aggregate.slug).await? {
        if other.id != aggregate.id {
            return Err(ContentError::DuplicateSlug(aggregate.slug));
        }
    }

    // Before write
    sanitize(&mut aggregate);
    aggregate.before_write();

    repository::update(conn, &aggregate)
        .await
        .map_err(|e| map_write_error(e, &aggregate.slug))?;
    Ok(aggregate)
}

/// Удаление записи
pub async fn delete(conn: &DatabaseConnection, id: Uuid) -> Result<(), ContentError> {
    if repository::delete(conn, id).await? {
        tracing::info!("Deleted content {}", id);
        Ok(())
    } else {
        Err(ContentError::NotFound(id.to_string()))
    }
}

/// Получение записи по ID
pub async fn get_by_id(conn: &DatabaseConnection, id: Uuid) -> Result<ContentRecord, ContentError> {
    repository::get_by_id(conn, id)
        .await?
        .ok_or_else(|| ContentError::NotFound(id.to_string()))
}

/// Список записей (опционально по типу)
pub async fn list_by_type(
    conn: &DatabaseConnection,
    content_type: Option<&str>,
) -> Result<Vec<ContentRecord>, ContentError> {
    Ok(repository::list_by_type(conn, content_type).await?)
}

pub async fn list_published(conn: &DatabaseConnection) -> Result<Vec<ContentRecord>, ContentError> {
    Ok(repository::list_published(conn).await?)
}

/// Статистика: всего / опубликовано / черновики
pub async fn stats(conn: &DatabaseConnection) -> Result<ContentStats, ContentError> {
    let total = repository::count(conn, None).await?;
    let published = repository::count(conn, Some(ContentStatus::Published)).await?;
    let draft = repository::count(conn, Some(ContentStatus::Draft)).await?;
    Ok(ContentStats {
        total,
        published,
        draft,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;

    fn dto(title: &str, slug: &str, status: Option<ContentStatus>) -> ContentDto {
        ContentDto {
            content_type: "post".to_string(),
            title: title.to_string(),
            slug: slug.to_string(),
            body: "<p>Hello</p>".to_string(),
            status,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_then_duplicate_slug() {
        let conn = connect_in_memory().await;

        let created = create(&conn, dto("Hello", "hello", None)).await.unwrap();
        assert_eq!(created.status, ContentStatus::Draft);
        assert_eq!(created.metadata.version, 1);

        let err = create(&conn, dto("Other", "hello", None)).await.unwrap_err();
        assert!(matches!(err, ContentError::DuplicateSlug(ref s) if s == "hello"));

        let listed = list_by_type(&conn, Some("post")).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Hello");
    }

    #[tokio::test]
    async fn test_stats_counts_by_status() {
        let conn = connect_in_memory().await;
        create(&conn, dto("One", "one", Some(ContentStatus::Published))).await.unwrap();
        create(&conn, dto("Two", "two", Some(ContentStatus::Published))).await.unwrap();
        create(&conn, dto("Three", "three", None)).await.unwrap();

        let stats = stats(&conn).await.unwrap();
        assert_eq!(
            stats,
            ContentStats {
                total: 3,
                published: 2,
                draft: 1
            }
        );
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let conn = connect_in_memory().await;
        let a = create(&conn, dto("A", "a", None)).await.unwrap();
        create(&conn, dto("B", "b", None)).await.unwrap();
        let id = a.id.value();

        let mut change = dto("A2", "b", None);
        let err = update(&conn, id, change.clone()).await.unwrap_err();
        assert!(matches!(err, ContentError::DuplicateSlug(_)));

        change.slug = "a-renamed".to_string();
        change.status = Some(ContentStatus::Published);
        let updated = update(&conn, id, change).await.unwrap();
        assert_eq!(updated.slug, "a-renamed");
        assert_eq!(get_by_id(&conn, id).await.unwrap().title, "A2");
        assert_eq!(list_published(&conn).await.unwrap().len(), 1);

        delete(&conn, id).await.unwrap();
        assert!(matches!(
            get_by_id(&conn, id).await.unwrap_err(),
            ContentError::NotFound(_)
        ));
        assert!(matches!(
            delete(&conn, id).await.unwrap_err(),
            ContentError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_validation_and_sanitizing() {
        let conn = connect_in_memory().await;

        let err = create(&conn, dto("", "empty-title", None)).await.unwrap_err();
        assert!(matches!(err, ContentError::Validation(_)));
        let err = create(&conn, dto("Bad", "Bad Slug", None)).await.unwrap_err();
        assert!(matches!(err, ContentError::Validation(_)));

        let mut with_script = dto("Script", "script", None);
        with_script.body = "<p>ok</p><script>alert(1)</script>".to_string();
        let created = create(&conn, with_script).await.unwrap();
        assert_eq!(created.body, "<p>ok</p>");
    }
}
