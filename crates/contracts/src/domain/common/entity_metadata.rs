use serde::{Deserialize, Serialize};

/// Метаданные записи (lifecycle tracking)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMetadata {
    /// Дата создания записи (назначается сервером)
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Дата последнего обновления (назначается сервером)
    pub updated_at: chrono::DateTime<chrono::Utc>,
    /// Версия для optimistic locking
    pub version: i32,
}

impl EntityMetadata {
    /// Создать новые метаданные для новой записи
    pub fn new() -> Self {
        let now = chrono::Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }

    /// Обновить timestamp и версию перед записью
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now();
        self.version += 1;
    }
}

impl Default for EntityMetadata {
    fn default() -> Self {
        Self::new()
    }
}
