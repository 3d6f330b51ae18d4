use super::repository::{self, NewPatchRow};
use contracts::shared::visual_editor::ApplyPatchRequest;
use sea_orm::{DatabaseConnection, TransactionTrait};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatchJournalError {
    #[error("{0}")]
    Invalid(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl From<sea_orm::DbErr> for PatchJournalError {
    fn from(err: sea_orm::DbErr) -> Self {
        PatchJournalError::Storage(err.into())
    }
}

pub fn validate(request: &ApplyPatchRequest) -> Result<(), PatchJournalError> {
    if request.patches.is_empty() {
        return Err(PatchJournalError::Invalid("No patches in request".into()));
    }
    for patch in &request.patches {
        if patch.source_file.trim().is_empty() {
            return Err(PatchJournalError::Invalid("Patch without source file".into()));
        }
        if patch.changes.is_empty() {
            return Err(PatchJournalError::Invalid(format!(
                "Patch for `{}` has no changes",
                patch.source_file
            )));
        }
        if let Some(change) = patch.changes.iter().find(|c| c.attribute.trim().is_empty()) {
            return Err(PatchJournalError::Invalid(format!(
                "Change `{}` for `{}` has no attribute",
                change.value, patch.source_file
            )));
        }
    }
    Ok(())
}

/// Validates and stores the whole request as one batch. Returns the number of
/// journaled changes.
pub async fn record(
    conn: &DatabaseConnection,
    request: &ApplyPatchRequest,
) -> Result<usize, PatchJournalError> {
    validate(request)?;

    let batch_id = uuid::Uuid::new_v4().to_string();
    let txn = conn.begin().await?;
    let mut applied = 0;
    for patch in &request.patches {
        for change in &patch.changes {
            repository::insert(
                &txn,
                NewPatchRow {
                    batch_id: &batch_id,
                    source_file: &patch.source_file,
                    attribute: &change.attribute,
                    value: &change.value,
                    old_value: &change.old_value,
                },
            )
            .await?;
            applied += 1;
        }
    }
    txn.commit().await?;

    tracing::info!(
        "Journaled patch batch {}: {} change(s) in {} source(s)",
        batch_id,
        applied,
        request.patches.len()
    );
    Ok(applied)
}

pub async fn list_recent(
    conn: &DatabaseConnection,
    limit: u64,
) -> Result<Vec<repository::Model>, PatchJournalError> {
    Ok(repository::list_recent(conn, limit).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use contracts::shared::visual_editor::{AttributeChange, ChangeSet};

    fn request() -> ApplyPatchRequest {
        ChangeSet::from_changes(vec![
            AttributeChange {
                source_file: "src/hero.rs:12".into(),
                attribute: "class".into(),
                new_value: "hero hero--dark".into(),
                old_value: "hero".into(),
            },
            AttributeChange {
                source_file: "src/hero.rs:12".into(),
                attribute: "data-variant".into(),
                new_value: "wide".into(),
                old_value: "".into(),
            },
            AttributeChange {
                source_file: "footer.site".into(),
                attribute: "style".into(),
                new_value: "color: red".into(),
                old_value: "".into(),
            },
        ])
        .to_request()
    }

    #[tokio::test]
    async fn test_record_journals_every_change() {
        let conn = connect_in_memory().await;

        let applied = record(&conn, &request()).await.unwrap();
        assert_eq!(applied, 3);

        let rows = list_recent(&conn, 10).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.batch_id == rows[0].batch_id));
        assert_eq!(rows[2].source_file, "src/hero.rs:12");
        assert_eq!(rows[2].old_value, "hero");
    }

    #[tokio::test]
    async fn test_empty_request_is_rejected() {
        let conn = connect_in_memory().await;
        let err = record(&conn, &ApplyPatchRequest { patches: vec![] })
            .await
            .unwrap_err();
        assert!(matches!(err, PatchJournalError::Invalid(_)));
        assert!(list_recent(&conn, 10).await.unwrap().is_empty());
    }

    #[test]
    fn test_blank_attribute_is_invalid() {
        let mut req = request();
        req.patches[0].changes[0].attribute = " ".into();
        assert!(validate(&req).is_err());
    }
}
