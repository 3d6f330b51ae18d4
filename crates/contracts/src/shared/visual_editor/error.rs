use thiserror::Error;

use super::discoverer::EntryId;

/// Ошибка сервиса применения патчей или транспорта
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("no response from the patch service within the save timeout")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("patch rejected: {0}")]
    Rejected(String),
}

/// Ошибки визуального редактора
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("no component is selected")]
    NoSelection,

    #[error("nothing to save: the edit buffer matches the baseline")]
    NoChanges,

    #[error("the selected component belongs to a previous scan")]
    StaleSelection,

    #[error("unknown component {0}")]
    UnknownEntry(EntryId),

    #[error("save failed: {0}")]
    SaveDispatchFailure(#[from] DispatchError),

    #[error("nothing to undo or redo")]
    HistoryEmpty,

    /// The element a history entry was committed against is gone.
    #[error("component {0} is no longer on the page")]
    HistoryTargetMissing(String),
}

impl EditorError {
    /// Errors the operator should see; the rest are handled inside the session.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            EditorError::SaveDispatchFailure(_) | EditorError::HistoryTargetMissing(_)
        )
    }
}
