use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::common::{AggregateId, EntityMetadata};

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор записи контента
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentId(pub Uuid);

impl ContentId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for ContentId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ContentId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Status
// ============================================================================

/// Статус публикации
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    #[default]
    Draft,
    Published,
}

impl ContentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStatus::Draft => "draft",
            ContentStatus::Published => "published",
        }
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ContentStatus::Draft),
            "published" => Ok(ContentStatus::Published),
            other => Err(format!("Unknown status: {}", other)),
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Запись контента (страница, пост, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: ContentId,

    #[serde(rename = "type")]
    pub content_type: String,

    pub title: String,
    /// Глобально уникален
    pub slug: String,
    pub body: String,
    pub excerpt: Option<String>,

    #[serde(rename = "categoryId")]
    pub category_id: Option<String>,

    pub status: ContentStatus,

    #[serde(rename = "seoTitle")]
    pub seo_title: Option<String>,

    #[serde(rename = "seoDescription")]
    pub seo_description: Option<String>,

    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl ContentRecord {
    /// Создать новую запись для вставки в БД
    pub fn new_for_insert(dto: &ContentDto) -> Self {
        Self {
            id: ContentId::new_v4(),
            content_type: dto.content_type.trim().to_string(),
            title: dto.title.trim().to_string(),
            slug: dto.slug.trim().to_string(),
            body: dto.body.clone(),
            excerpt: dto.excerpt.clone(),
            category_id: dto.category_id.clone(),
            status: dto.status.unwrap_or_default(),
            seo_title: dto.seo_title.clone(),
            seo_description: dto.seo_description.clone(),
            metadata: EntityMetadata::new(),
        }
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }

    /// Обновить данные из DTO (статус меняется только если передан)
    pub fn update(&mut self, dto: &ContentDto) {
        self.content_type = dto.content_type.trim().to_string();
        self.title = dto.title.trim().to_string();
        self.slug = dto.slug.trim().to_string();
        self.body = dto.body.clone();
        self.excerpt = dto.excerpt.clone();
        self.category_id = dto.category_id.clone();
        if let Some(status) = dto.status {
            self.status = status;
        }
        self.seo_title = dto.seo_title.clone();
        self.seo_description = dto.seo_description.clone();
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.content_type.is_empty() {
            return Err("Type must not be empty".into());
        }
        if self.title.is_empty() {
            return Err("Title must not be empty".into());
        }
        if !is_valid_slug(&self.slug) {
            return Err(format!(
                "Slug `{}` must be lowercase letters, digits and single dashes",
                self.slug
            ));
        }
        Ok(())
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.metadata.touch();
    }

    /// Публичный путь записи
    pub fn public_path(&self) -> String {
        format!("/{}/{}", self.content_type, self.slug)
    }
}

/// `hello-world`, `post-2`; no leading, trailing or double dashes.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления записи
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ContentDto {
    pub id: Option<String>,

    #[serde(rename = "type")]
    pub content_type: String,

    pub title: String,
    pub slug: String,

    #[serde(default)]
    pub body: String,

    #[serde(default)]
    pub excerpt: Option<String>,

    #[serde(rename = "categoryId", default)]
    pub category_id: Option<String>,

    #[serde(default)]
    pub status: Option<ContentStatus>,

    #[serde(rename = "seoTitle", default)]
    pub seo_title: Option<String>,

    #[serde(rename = "seoDescription", default)]
    pub seo_description: Option<String>,
}

/// Агрегированная статистика по контенту
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentStats {
    pub total: u64,
    pub published: u64,
    pub draft: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(title: &str, slug: &str) -> ContentDto {
        ContentDto {
            content_type: "post".to_string(),
            title: title.to_string(),
            slug: slug.to_string(),
            ..ContentDto::default()
        }
    }

    #[test]
    fn test_slug_rules() {
        assert!(is_valid_slug("hello"));
        assert!(is_valid_slug("hello-world-2"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Hello"));
        assert!(!is_valid_slug("-hello"));
        assert!(!is_valid_slug("hello--world"));
        assert!(!is_valid_slug("hello world"));
    }

    #[test]
    fn test_new_record_defaults_to_draft() {
        let record = ContentRecord::new_for_insert(&dto(" Hello ", "hello"));
        assert_eq!(record.status, ContentStatus::Draft);
        assert_eq!(record.title, "Hello");
        assert!(record.validate().is_ok());
        assert_eq!(record.public_path(), "/post/hello");
    }

    #[test]
    fn test_validation_errors() {
        assert!(ContentRecord::new_for_insert(&dto("", "hello")).validate().is_err());
        assert!(ContentRecord::new_for_insert(&dto("Hi", "Bad Slug")).validate().is_err());
    }

    #[test]
    fn test_dto_wire_names() {
        let json = serde_json::json!({
            "type": "post",
            "title": "Hello",
            "slug": "hello",
            "status": "published",
            "seoTitle": "Hello | Site"
        });
        let dto: ContentDto = serde_json::from_value(json).unwrap();
        assert_eq!(dto.status, Some(ContentStatus::Published));
        assert_eq!(dto.seo_title.as_deref(), Some("Hello | Site"));
        assert_eq!(dto.body, "");
    }
}
