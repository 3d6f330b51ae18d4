use thiserror::Error;

/// Ошибки хранилища контента
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Slug `{0}` is already taken")]
    DuplicateSlug(String),

    #[error("Content record {0} not found")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl From<sea_orm::DbErr> for ContentError {
    fn from(err: sea_orm::DbErr) -> Self {
        ContentError::Storage(err.into())
    }
}
