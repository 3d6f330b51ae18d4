//! Linear undo/redo over committed change-sets.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use super::change_set::ChangeSet;

/// Зафиксированное изменение и элемент, к которому оно относится
///
/// Never mutated after commit. `target` is the live element the change-set
/// was built from; it outlives rescans but not a preview reload.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry<N> {
    pub change_set: ChangeSet,
    pub target: N,
    pub committed_at: DateTime<Utc>,
}

/// Undo and redo stacks. The undo stack keeps at most `max_depth` entries,
/// dropping the oldest.
#[derive(Debug, Clone)]
pub struct HistoryManager<N> {
    undo_stack: VecDeque<HistoryEntry<N>>,
    redo_stack: Vec<HistoryEntry<N>>,
    max_depth: usize,
}

impl<N> HistoryManager<N> {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Record a successful save. Clears the redo stack.
    pub fn commit(&mut self, change_set: ChangeSet, target: N) {
        self.undo_stack.push_back(HistoryEntry {
            change_set,
            target,
            committed_at: Utc::now(),
        });
        self.redo_stack.clear();

        while self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }
    }

    /// Entry the next [`undo`](Self::undo) would revert.
    pub fn peek_undo(&self) -> Option<&HistoryEntry<N>> {
        self.undo_stack.back()
    }

    /// Entry the next [`redo`](Self::redo) would re-apply.
    pub fn peek_redo(&self) -> Option<&HistoryEntry<N>> {
        self.redo_stack.last()
    }

    /// Moves the latest entry to the redo stack and returns the change-set
    /// that reverts it.
    pub fn undo(&mut self) -> Option<ChangeSet> {
        let entry = self.undo_stack.pop_back()?;
        let inverse = entry.change_set.inverse();
        self.redo_stack.push(entry);
        Some(inverse)
    }

    /// Moves the latest undone entry back and returns it for re-application.
    pub fn redo(&mut self) -> Option<ChangeSet> {
        let entry = self.redo_stack.pop()?;
        let forward = entry.change_set.clone();
        self.undo_stack.push_back(entry);
        Some(forward)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Most recent first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry<N>> {
        self.undo_stack.iter().rev()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
