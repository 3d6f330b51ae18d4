//! Change-sets and the apply-patch wire shapes.

use serde::{Deserialize, Serialize};

use super::diff::PropertyDiff;
use super::live_tree::LiveTree;

/// One attribute rewrite inside a [`ChangeSet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeChange {
    pub source_file: String,
    pub attribute: String,
    pub new_value: String,
    pub old_value: String,
}

/// Набор изменений атрибутов, сгруппированный по источнику
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChangeSet {
    changes: Vec<AttributeChange>,
}

impl ChangeSet {
    /// Change-set for the edits of one component.
    pub fn from_diff(source_file: &str, diff: &[PropertyDiff]) -> Self {
        Self {
            changes: diff
                .iter()
                .map(|d| AttributeChange {
                    source_file: source_file.to_string(),
                    attribute: d.key.clone(),
                    new_value: d.new.clone(),
                    old_value: d.old.clone(),
                })
                .collect(),
        }
    }

    /// Groups `changes` by source, keeping first-seen source order and the
    /// relative order of changes within each source.
    pub fn from_changes(changes: Vec<AttributeChange>) -> Self {
        let mut order: Vec<String> = Vec::new();
        for change in &changes {
            if !order.contains(&change.source_file) {
                order.push(change.source_file.clone());
            }
        }
        let mut grouped = Vec::with_capacity(changes.len());
        for source in &order {
            grouped.extend(changes.iter().filter(|c| &c.source_file == source).cloned());
        }
        Self { changes: grouped }
    }

    pub fn changes(&self) -> &[AttributeChange] {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Distinct sources in group order.
    pub fn source_files(&self) -> Vec<&str> {
        let mut sources: Vec<&str> = Vec::new();
        for change in &self.changes {
            if !sources.contains(&change.source_file.as_str()) {
                sources.push(&change.source_file);
            }
        }
        sources
    }

    /// Same changes with new and old values swapped.
    pub fn inverse(&self) -> Self {
        Self {
            changes: self
                .changes
                .iter()
                .map(|c| AttributeChange {
                    source_file: c.source_file.clone(),
                    attribute: c.attribute.clone(),
                    new_value: c.old_value.clone(),
                    old_value: c.new_value.clone(),
                })
                .collect(),
        }
    }

    pub fn to_patches(&self) -> Vec<SourcePatch> {
        self.source_files()
            .into_iter()
            .map(|source| SourcePatch {
                source_file: source.to_string(),
                changes: self
                    .changes
                    .iter()
                    .filter(|c| c.source_file == source)
                    .map(|c| PatchChange {
                        kind: PatchChangeKind::Replace,
                        attribute: c.attribute.clone(),
                        value: c.new_value.clone(),
                        old_value: c.old_value.clone(),
                    })
                    .collect(),
            })
            .collect()
    }

    pub fn to_request(&self) -> ApplyPatchRequest {
        ApplyPatchRequest {
            patches: self.to_patches(),
        }
    }
}

/// Writes `change_set` into `target`, the element it was built from. Empty
/// values remove the attribute. Returns the number of attribute writes, zero
/// when the element is no longer on the page.
///
/// Source hints only group the wire payload: synthesized hints are not unique,
/// so the tree is never addressed by them.
///
/// Commit, undo and redo all mutate the live tree through this function only.
pub fn apply_change_set<T: LiveTree>(tree: &T, target: &T::Node, change_set: &ChangeSet) -> usize {
    if !tree.is_connected(target) {
        return 0;
    }
    for change in change_set.changes() {
        if change.new_value.is_empty() {
            tree.remove_attribute(target, &change.attribute);
        } else {
            tree.set_attribute(target, &change.attribute, &change.new_value);
        }
    }
    change_set.len()
}

// ── Wire shapes ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchChangeKind {
    Replace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchChange {
    #[serde(rename = "type")]
    pub kind: PatchChangeKind,
    pub attribute: String,
    pub value: String,
    pub old_value: String,
}

/// All changes for one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcePatch {
    pub source_file: String,
    pub changes: Vec<PatchChange>,
}

/// POST /api/visual-editor/apply-patch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyPatchRequest {
    pub patches: Vec<SourcePatch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyPatchResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub applied: usize,
}
