//! Editor session: registry, selection, edit buffer, dispatch and history for
//! one preview lifetime.
//!
//! Created by the first scan of a preview, ended by [`EditorSession::teardown`].
//! All operations run on the caller's thread and finish before returning; only
//! the collaborator call of a save is asynchronous (see `dispatcher`).

use serde::{Deserialize, Serialize};

use super::change_set::{apply_change_set, ChangeSet};
use super::diff::{PropertyDiff, PropertyDiffEngine};
use super::discoverer::{
    snapshot_attributes, AttributeSnapshot, ComponentEntry, Discoverer, EntryId, Registry,
};
use super::dispatcher::{PatchDispatcher, PendingSave, SaveCompletion, SaveTicket};
use super::error::{DispatchError, EditorError};
use super::history::{HistoryEntry, HistoryManager};
use super::live_tree::LiveTree;
use super::selection::{clear_highlights, SelectOutcome, SelectionController};
use super::settings::EditorSettings;

/// A selection change that would throw away unsaved edits. Returned instead of
/// acting; the caller confirms or rejects it with [`EditorSession::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDecision {
    pub target: EntryId,
    pub discarded_keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectRequest {
    Done(SelectOutcome),
    NeedsConfirmation(PendingDecision),
}

/// Сессия редактора для одной загрузки превью
pub struct EditorSession<T: LiveTree> {
    tree: T,
    settings: EditorSettings,
    discoverer: Discoverer,
    registry: Registry<T::Node>,
    selection: SelectionController,
    diff: PropertyDiffEngine,
    dispatcher: PatchDispatcher<T::Node>,
    history: HistoryManager<T::Node>,
}

impl<T: LiveTree> EditorSession<T> {
    /// Starts a session with the first scan of `tree`.
    pub fn new(tree: T, settings: EditorSettings) -> Self {
        let mut session = Self {
            discoverer: Discoverer::new(&settings),
            registry: Registry::empty(),
            selection: SelectionController::new(),
            diff: PropertyDiffEngine::new(),
            dispatcher: PatchDispatcher::new(),
            history: HistoryManager::new(settings.history_depth),
            tree,
            settings,
        };
        session.rescan();
        session
    }

    pub fn tree(&self) -> &T {
        &self.tree
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn registry(&self) -> &Registry<T::Node> {
        &self.registry
    }

    pub fn generation(&self) -> u64 {
        self.registry.generation()
    }

    pub fn history(&self) -> &HistoryManager<T::Node> {
        &self.history
    }

    // ── Discovery ────────────────────────────────────────────────────────────

    /// Replaces the registry with a fresh generation. Selection and edit
    /// buffer from the previous generation are dropped.
    pub fn rescan(&mut self) -> u64 {
        self.registry = self.discoverer.scan(&self.tree);
        if self.selection.invalidate(&self.tree, self.registry.generation()) {
            self.diff.clear();
        }
        clear_highlights(&self.tree);
        self.registry.generation()
    }

    /// The preview finished loading a (possibly new) page.
    pub fn reload(&mut self, tree: T) -> u64 {
        self.tree = tree;
        self.rescan()
    }

    // ── Selection ────────────────────────────────────────────────────────────

    pub fn selected(&self) -> Option<&ComponentEntry<T::Node>> {
        self.selection.active().and_then(|id| self.registry.get(id))
    }

    pub fn select(&mut self, id: EntryId) -> SelectOutcome {
        let outcome = self.selection.select(&self.tree, &self.registry, id);
        match outcome {
            SelectOutcome::Selected(id) => {
                let baseline = self.current_snapshot(id).unwrap_or_default();
                self.diff.seed(baseline);
            }
            SelectOutcome::Deselected | SelectOutcome::Stale => self.diff.clear(),
        }
        outcome
    }

    /// Like [`select`](Self::select) but asks first when unsaved edits would
    /// be lost.
    pub fn request_select(&mut self, id: EntryId) -> SelectRequest {
        if self.selection.active().is_some() && self.diff.has_changes() {
            return SelectRequest::NeedsConfirmation(PendingDecision {
                target: id,
                discarded_keys: self.diff.changed_keys(),
            });
        }
        SelectRequest::Done(self.select(id))
    }

    /// `None` when the decision was rejected; nothing changes then.
    pub fn resolve(&mut self, decision: PendingDecision, confirmed: bool) -> Option<SelectOutcome> {
        if !confirmed {
            return None;
        }
        Some(self.select(decision.target))
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear(&self.tree);
        self.diff.clear();
    }

    pub fn clear_highlights(&self) {
        clear_highlights(&self.tree);
    }

    // ── Editing ──────────────────────────────────────────────────────────────

    /// Returns the new `has_changes`.
    pub fn set_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<bool, EditorError> {
        self.ensure_selection()?;
        Ok(self.diff.set_property(key, value))
    }

    pub fn reset(&mut self) {
        self.diff.reset();
    }

    pub fn has_changes(&self) -> bool {
        self.diff.has_changes()
    }

    pub fn diff(&self) -> Vec<PropertyDiff> {
        self.diff.diff()
    }

    pub fn baseline(&self) -> &AttributeSnapshot {
        self.diff.baseline()
    }

    pub fn edit_buffer(&self) -> &AttributeSnapshot {
        self.diff.buffer()
    }

    // ── Saving ───────────────────────────────────────────────────────────────

    /// Builds the change-set from the current baseline and buffer and issues
    /// a ticket for it. Supersedes any save still in flight.
    pub fn begin_save(&mut self) -> Result<PendingSave, EditorError> {
        let entry = self.ensure_selection()?;
        let (id, target) = (entry.id, entry.node().clone());
        let source = entry.source_hint.value.clone();
        if !self.diff.has_changes() {
            return Err(EditorError::NoChanges);
        }
        let change_set = ChangeSet::from_diff(&source, &self.diff.diff());
        Ok(self.dispatcher.issue(id, target, change_set))
    }

    /// Settles a save. Superseded tickets are discarded without touching any
    /// state; failures leave baseline, buffer and history as they were.
    ///
    /// A save that lands after a rescan is still committed: the patch service
    /// already applied it. The element it was built from gets the new values
    /// if it is still on the page, and the edit buffer is only rebased when
    /// that same entry is still selected.
    pub fn complete_save(
        &mut self,
        ticket: SaveTicket,
        outcome: Result<(), DispatchError>,
    ) -> Result<SaveCompletion, EditorError> {
        let Some(flight) = self.dispatcher.settle(ticket) else {
            log::debug!("save #{}: superseded, response dropped", ticket.seq());
            return Ok(SaveCompletion::Superseded);
        };

        if let Err(err) = outcome {
            log::warn!("save #{} failed: {}", flight.seq, err);
            return Err(EditorError::SaveDispatchFailure(err));
        }

        let writes = self.apply_to_tree(&flight.target, &flight.change_set);
        if writes == 0 {
            log::info!("save #{}: element left the page, preview not updated", flight.seq);
        }
        if self.selection.active() == Some(flight.entry) {
            self.diff.rebase(&flight.change_set);
        }
        self.history.commit(flight.change_set.clone(), flight.target);
        log::info!("save #{}: committed {} change(s)", flight.seq, flight.change_set.len());
        Ok(SaveCompletion::Committed(flight.change_set))
    }

    pub fn is_saving(&self) -> bool {
        self.dispatcher.is_pending()
    }

    // ── History ──────────────────────────────────────────────────────────────

    /// Reverts the latest commit in the live tree. The returned change-set is
    /// what was applied, for forwarding to the patch collaborator.
    ///
    /// When the committed element can no longer be found nothing is written
    /// and both stacks stay as they were.
    pub fn undo(&mut self) -> Result<ChangeSet, EditorError> {
        let entry = self.history.peek_undo().ok_or(EditorError::HistoryEmpty)?;
        let target = self.resolve_target(entry)?;
        let change_set = entry.change_set.inverse();

        self.apply_history_step(&target, &change_set)?;
        self.history.undo();
        Ok(change_set)
    }

    pub fn redo(&mut self) -> Result<ChangeSet, EditorError> {
        let entry = self.history.peek_redo().ok_or(EditorError::HistoryEmpty)?;
        let target = self.resolve_target(entry)?;
        let change_set = entry.change_set.clone();

        self.apply_history_step(&target, &change_set)?;
        self.history.redo();
        Ok(change_set)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ── Teardown ─────────────────────────────────────────────────────────────

    /// Ends the session: highlights removed, all state dropped, any in-flight
    /// save will be treated as superseded.
    pub fn teardown(&mut self) {
        self.selection.clear(&self.tree);
        self.diff.clear();
        self.dispatcher.cancel();
        self.history.clear();
        self.registry = Registry::empty();
    }

    /// Live-tree write plus snapshot refresh of the touched entry.
    fn apply_to_tree(&mut self, target: &T::Node, change_set: &ChangeSet) -> usize {
        let writes = apply_change_set(&self.tree, target, change_set);
        self.registry.refresh_snapshot(&self.tree, target);
        writes
    }

    fn apply_history_step(
        &mut self,
        target: &T::Node,
        change_set: &ChangeSet,
    ) -> Result<(), EditorError> {
        if self.apply_to_tree(target, change_set) == 0 {
            return Err(EditorError::HistoryTargetMissing(source_of(change_set)));
        }
        let target_selected = self.selected().is_some_and(|e| e.node() == target);
        if target_selected {
            // Unsaved edits of the affected component are dropped.
            self.diff.rebase(change_set);
        }
        Ok(())
    }

    /// The element a history entry was committed against. A re-rendered
    /// element is found again only through a unique explicit `file:line` hint.
    fn resolve_target(&self, entry: &HistoryEntry<T::Node>) -> Result<T::Node, EditorError> {
        if self.tree.is_connected(&entry.target) {
            return Ok(entry.target.clone());
        }
        let source = source_of(&entry.change_set);
        let mut matches = self
            .registry
            .by_source(&source)
            .filter(|e| e.source_hint.explicit && self.tree.is_connected(e.node()));
        match (matches.next(), matches.next()) {
            (Some(found), None) => {
                log::debug!("history target re-resolved through {}", source);
                Ok(found.node().clone())
            }
            _ => Err(EditorError::HistoryTargetMissing(source.clone())),
        }
    }

    fn ensure_selection(&mut self) -> Result<&ComponentEntry<T::Node>, EditorError> {
        let Some(id) = self.selection.active() else {
            return Err(EditorError::NoSelection);
        };
        if self.registry.get(id).is_none() {
            self.clear_selection();
            return Err(EditorError::StaleSelection);
        }
        self.registry.get(id).ok_or(EditorError::UnknownEntry(id))
    }

    /// Attributes as the page shows them now, falling back to the scan snapshot.
    fn current_snapshot(&self, id: EntryId) -> Option<AttributeSnapshot> {
        let entry = self.registry.get(id)?;
        if self.tree.is_connected(entry.node()) {
            Some(snapshot_attributes(&self.tree, entry.node()))
        } else {
            Some(entry.attributes.clone())
        }
    }
}

fn source_of(change_set: &ChangeSet) -> String {
    change_set
        .source_files()
        .first()
        .map(|s| s.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::visual_editor::live_tree::{EDITABLE_ATTR, HIGHLIGHT_ATTR, SOURCE_ATTR};
    use crate::shared::visual_editor::memory_tree::MemoryTree;

    fn page() -> MemoryTree {
        let tree = MemoryTree::new();
        tree.push("section", &[("id", "hero"), ("class", "hero")], "Welcome");
        tree.push("div", &[("class", "card"), ("data-variant", "wide")], "Card");
        tree
    }

    fn session() -> EditorSession<MemoryTree> {
        EditorSession::new(page(), EditorSettings::default())
    }

    fn first_id(session: &EditorSession<MemoryTree>) -> EntryId {
        session.registry().entries()[0].id
    }

    fn commit(session: &mut EditorSession<MemoryTree>) -> SaveCompletion {
        let pending = session.begin_save().unwrap();
        session.complete_save(pending.ticket, Ok(())).unwrap()
    }

    #[test]
    fn test_selecting_twice_returns_to_unselected() {
        let mut session = session();
        let id = first_id(&session);

        session.select(id);
        session.set_property("class", "hero big").unwrap();
        assert_eq!(session.select(id), SelectOutcome::Deselected);

        assert!(session.selected().is_none());
        assert!(session.edit_buffer().is_empty());
        assert!(!session.has_changes());
    }

    #[test]
    fn test_switching_selection_seeds_fresh_baseline() {
        let mut session = session();
        let hero = session.registry().entries()[0].id;
        let card = session.registry().entries()[1].id;

        session.select(hero);
        session.set_property("class", "changed").unwrap();
        session.select(card);

        assert!(!session.has_changes());
        assert_eq!(session.baseline().get("data-variant").map(String::as_str), Some("wide"));
        assert_eq!(session.edit_buffer(), session.baseline());
    }

    #[test]
    fn test_rescan_clears_stale_selection() {
        let mut session = session();
        let id = first_id(&session);
        session.select(id);
        session.set_property("id", "other").unwrap();

        session.rescan();

        assert!(session.selected().is_none());
        assert!(!session.has_changes());
        assert!(session.tree().elements_with_attribute(HIGHLIGHT_ATTR).is_empty());
        assert_eq!(session.select(id), SelectOutcome::Stale);
        assert_eq!(session.set_property("id", "x"), Err(EditorError::NoSelection));
    }

    #[test]
    fn test_save_requires_selection_and_changes() {
        let mut session = session();
        assert_eq!(session.begin_save().unwrap_err(), EditorError::NoSelection);

        let id = first_id(&session);
        session.select(id);
        assert_eq!(session.begin_save().unwrap_err(), EditorError::NoChanges);
    }

    #[test]
    fn test_failed_save_changes_nothing() {
        let mut session = session();
        let id = first_id(&session);
        session.select(id);
        session.set_property("class", "hero hero--tall").unwrap();
        let buffer = session.edit_buffer().clone();
        let baseline = session.baseline().clone();

        let pending = session.begin_save().unwrap();
        let result = session.complete_save(pending.ticket, Err(DispatchError::Timeout));

        assert_eq!(
            result,
            Err(EditorError::SaveDispatchFailure(DispatchError::Timeout))
        );
        assert_eq!(session.edit_buffer(), &buffer);
        assert_eq!(session.baseline(), &baseline);
        assert!(session.has_changes());
        assert!(!session.can_undo());
        assert_eq!(session.tree().attr(0, "class").as_deref(), Some("hero"));

        // Retry without re-selecting.
        assert!(matches!(commit(&mut session), SaveCompletion::Committed(_)));
    }

    #[test]
    fn test_last_issued_save_wins() {
        let mut session = session();
        let id = first_id(&session);
        session.select(id);

        session.set_property("class", "from-a").unwrap();
        let a = session.begin_save().unwrap();
        session.set_property("class", "from-b").unwrap();
        let b = session.begin_save().unwrap();

        assert!(matches!(
            session.complete_save(b.ticket, Ok(())),
            Ok(SaveCompletion::Committed(_))
        ));
        assert_eq!(
            session.complete_save(a.ticket, Ok(())),
            Ok(SaveCompletion::Superseded)
        );

        assert_eq!(session.history().undo_depth(), 1);
        assert_eq!(session.baseline().get("class").map(String::as_str), Some("from-b"));
        assert_eq!(session.tree().attr(0, "class").as_deref(), Some("from-b"));
    }

    #[test]
    fn test_superseded_failure_is_not_surfaced() {
        let mut session = session();
        let id = first_id(&session);
        session.select(id);
        session.set_property("class", "a").unwrap();
        let a = session.begin_save().unwrap();
        let b = session.begin_save().unwrap();

        assert_eq!(
            session.complete_save(a.ticket, Err(DispatchError::Timeout)),
            Ok(SaveCompletion::Superseded)
        );
        assert!(session.is_saving());
        assert!(session.complete_save(b.ticket, Ok(())).is_ok());
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut session = session();
        let id = first_id(&session);
        session.select(id);
        let original = session.baseline().clone();

        for i in 1..=6 {
            session.set_property("class", format!("hero v{}", i)).unwrap();
            if i % 2 == 0 {
                session.set_property("style", format!("padding: {}px", i)).unwrap();
            }
            assert!(matches!(commit(&mut session), SaveCompletion::Committed(_)));
        }
        let last = session.baseline().clone();
        assert_eq!(session.tree().attr(0, "style").as_deref(), Some("padding: 6px"));

        for _ in 0..6 {
            assert!(session.undo().is_ok());
        }
        assert_eq!(session.undo(), Err(EditorError::HistoryEmpty));
        assert_eq!(session.baseline(), &original);
        assert_eq!(session.tree().attr(0, "class").as_deref(), Some("hero"));
        assert_eq!(session.tree().attr(0, "style"), None);

        for _ in 0..6 {
            assert!(session.redo().is_ok());
        }
        assert_eq!(session.baseline(), &last);
        assert_eq!(session.tree().attr(0, "class").as_deref(), Some("hero v6"));
    }

    #[test]
    fn test_commit_and_undo_refresh_registry_snapshot() {
        let mut session = session();
        let id = first_id(&session);
        session.select(id);
        session.set_property("class", "hero hero--wide").unwrap();
        commit(&mut session);

        let entry = session.registry().get(id).unwrap();
        assert_eq!(entry.attributes.get("class").map(String::as_str), Some("hero hero--wide"));

        session.undo().unwrap();
        let entry = session.registry().get(id).unwrap();
        assert_eq!(entry.attributes.get("class").map(String::as_str), Some("hero"));
        assert_eq!(session.generation(), id.generation);
    }

    #[test]
    fn test_commit_after_undo_drops_redo() {
        let mut session = session();
        let id = first_id(&session);
        session.select(id);
        session.set_property("class", "one").unwrap();
        commit(&mut session);
        session.undo().unwrap();
        assert!(session.can_redo());

        session.set_property("class", "two").unwrap();
        commit(&mut session);
        assert!(!session.can_redo());
    }

    #[test]
    fn test_pending_decision_flow() {
        let mut session = session();
        let hero = session.registry().entries()[0].id;
        let card = session.registry().entries()[1].id;
        session.select(hero);
        session.set_property("class", "dirty").unwrap();

        let SelectRequest::NeedsConfirmation(decision) = session.request_select(card) else {
            panic!("expected a confirmation request");
        };
        assert_eq!(decision.discarded_keys, vec!["class".to_string()]);

        assert_eq!(session.resolve(decision.clone(), false), None);
        assert_eq!(session.selected().map(|e| e.id), Some(hero));
        assert!(session.has_changes());

        assert_eq!(session.resolve(decision, true), Some(SelectOutcome::Selected(card)));
        assert!(!session.has_changes());

        assert_eq!(
            session.request_select(hero),
            SelectRequest::Done(SelectOutcome::Selected(hero))
        );
    }

    #[test]
    fn test_reselect_reads_current_attributes() {
        let mut session = session();
        let id = first_id(&session);
        session.select(id);
        session.set_property("class", "hero updated").unwrap();
        commit(&mut session);
        session.select(id);

        session.select(id);
        assert_eq!(session.baseline().get("class").map(String::as_str), Some("hero updated"));
    }

    #[test]
    fn test_teardown() {
        let mut session = session();
        let id = first_id(&session);
        session.select(id);
        session.set_property("class", "x").unwrap();
        let pending = session.begin_save().unwrap();

        session.teardown();

        assert!(session.registry().is_empty());
        assert!(session.selected().is_none());
        assert!(session.tree().elements_with_attribute(HIGHLIGHT_ATTR).is_empty());
        assert_eq!(
            session.complete_save(pending.ticket, Ok(())),
            Ok(SaveCompletion::Superseded)
        );
        assert!(!session.can_undo());
    }

    #[test]
    fn test_edit_touches_only_the_selected_twin() {
        let tree = MemoryTree::new();
        tree.push("div", &[("class", "card"), ("style", "color: red")], "A");
        tree.push("div", &[("class", "card"), ("style", "color: blue")], "B");
        let mut session = EditorSession::new(tree, EditorSettings::default());
        let hints: Vec<&str> = session
            .registry()
            .entries()
            .iter()
            .map(|e| e.source_hint.value.as_str())
            .collect();
        assert_eq!(hints, vec!["div.card", "div.card"]);

        let a = first_id(&session);
        session.select(a);
        session.set_property("style", "color: green").unwrap();
        commit(&mut session);

        assert_eq!(session.tree().attr(0, "style").as_deref(), Some("color: green"));
        assert_eq!(session.tree().attr(1, "style").as_deref(), Some("color: blue"));
        let twin = &session.registry().entries()[1];
        assert_eq!(twin.attributes.get("style").map(String::as_str), Some("color: blue"));

        session.undo().unwrap();
        assert_eq!(session.tree().attr(0, "style").as_deref(), Some("color: red"));
        assert_eq!(session.tree().attr(1, "style").as_deref(), Some("color: blue"));

        session.redo().unwrap();
        assert_eq!(session.tree().attr(0, "style").as_deref(), Some("color: green"));
        assert_eq!(session.tree().attr(1, "style").as_deref(), Some("color: blue"));
    }

    #[test]
    fn test_undo_after_rescan_reverts_the_element() {
        let mut session = session();
        let card = session.registry().entries()[1].id;
        session.select(card);
        session.set_property("class", "card card--wide").unwrap();
        commit(&mut session);

        session.rescan();
        assert_eq!(session.registry().entries()[1].source_hint.value, "div.card.card--wide");

        let reverted = session.undo().unwrap();
        assert_eq!(reverted.changes()[0].new_value, "card");
        assert_eq!(session.tree().attr(1, "class").as_deref(), Some("card"));
        assert!(session.can_redo());
        let entry = session.registry().by_node(&1).unwrap();
        assert_eq!(entry.attributes.get("class").map(String::as_str), Some("card"));
    }

    #[test]
    fn test_undo_of_a_removed_element_keeps_both_stacks() {
        let mut session = session();
        session.select(first_id(&session));
        session.set_property("class", "hero hero--wide").unwrap();
        commit(&mut session);

        // The page re-renders the section as a new element.
        session.tree().detach(0);
        let rerendered = session
            .tree()
            .push("section", &[("id", "hero"), ("class", "hero hero--wide")], "Welcome");
        session.rescan();

        assert_eq!(
            session.undo(),
            Err(EditorError::HistoryTargetMissing("section#hero".to_string()))
        );
        assert!(session.undo().unwrap_err().is_user_facing());
        assert_eq!(session.history().undo_depth(), 1);
        assert_eq!(session.history().redo_depth(), 0);
        assert_eq!(session.tree().attr(rerendered, "class").as_deref(), Some("hero hero--wide"));
    }

    #[test]
    fn test_undo_finds_rerendered_element_by_explicit_source() {
        let tree = MemoryTree::new();
        tree.push(
            "section",
            &[(EDITABLE_ATTR, "true"), (SOURCE_ATTR, "src/home.rs:4"), ("class", "hero")],
            "Welcome",
        );
        let mut session = EditorSession::new(tree, EditorSettings::default());
        session.select(first_id(&session));
        session.set_property("class", "hero hero--dark").unwrap();
        commit(&mut session);

        session.tree().detach(0);
        let rerendered = session.tree().push(
            "section",
            &[
                (EDITABLE_ATTR, "true"),
                (SOURCE_ATTR, "src/home.rs:4"),
                ("class", "hero hero--dark"),
            ],
            "Welcome",
        );
        session.rescan();

        session.undo().unwrap();
        assert_eq!(session.tree().attr(rerendered, "class").as_deref(), Some("hero"));
        session.redo().unwrap();
        assert_eq!(session.tree().attr(rerendered, "class").as_deref(), Some("hero hero--dark"));
    }

    #[test]
    fn test_save_settling_after_rescan_commits_without_rebase() {
        let mut session = session();
        let hero = first_id(&session);
        session.select(hero);
        session.set_property("class", "hero hero--wide").unwrap();
        let pending = session.begin_save().unwrap();

        session.rescan();
        let completion = session.complete_save(pending.ticket, Ok(()));

        assert!(matches!(completion, Ok(SaveCompletion::Committed(_))));
        assert!(session.selected().is_none());
        assert!(!session.has_changes());
        assert_eq!(session.history().undo_depth(), 1);
        assert_eq!(session.tree().attr(0, "class").as_deref(), Some("hero hero--wide"));
        let current = session.registry().by_node(&0).unwrap();
        assert_ne!(current.id, hero);
        assert_eq!(current.attributes.get("class").map(String::as_str), Some("hero hero--wide"));

        session.undo().unwrap();
        assert_eq!(session.tree().attr(0, "class").as_deref(), Some("hero"));
    }

    #[test]
    fn test_save_settling_after_rerender_commits_history_only() {
        let mut session = session();
        session.select(first_id(&session));
        session.set_property("class", "hero hero--wide").unwrap();
        let pending = session.begin_save().unwrap();

        session.tree().detach(0);
        let rerendered = session
            .tree()
            .push("section", &[("id", "hero"), ("class", "hero")], "Welcome");
        session.rescan();

        assert!(matches!(
            session.complete_save(pending.ticket, Ok(())),
            Ok(SaveCompletion::Committed(_))
        ));
        assert_eq!(session.history().undo_depth(), 1);
        assert_eq!(session.tree().attr(rerendered, "class").as_deref(), Some("hero"));
        assert!(matches!(
            session.undo(),
            Err(EditorError::HistoryTargetMissing(_))
        ));
    }
}
