//! Single active selection with a highlight overlay.

use serde::{Deserialize, Serialize};

use super::discoverer::{EntryId, Registry};
use super::live_tree::{LiveTree, HIGHLIGHT_ATTR};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectOutcome {
    Selected(EntryId),
    Deselected,
    /// The id belonged to an older scan; the selection was cleared.
    Stale,
}

/// Текущий выбранный компонент
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    active: Option<EntryId>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<EntryId> {
        self.active
    }

    /// Toggle semantics: the active id deselects, any other current id
    /// replaces the selection.
    pub fn select<T: LiveTree>(
        &mut self,
        tree: &T,
        registry: &Registry<T::Node>,
        id: EntryId,
    ) -> SelectOutcome {
        if self.active == Some(id) && registry.get(id).is_some() {
            self.clear(tree);
            return SelectOutcome::Deselected;
        }

        let Some(entry) = registry.get(id) else {
            log::debug!("select {}: not in generation {}", id, registry.generation());
            self.clear(tree);
            return SelectOutcome::Stale;
        };

        clear_highlights(tree);
        if tree.is_connected(entry.node()) {
            tree.set_attribute(entry.node(), HIGHLIGHT_ATTR, "");
        }
        self.active = Some(id);
        SelectOutcome::Selected(id)
    }

    /// Drop the selection and its highlight.
    pub fn clear<T: LiveTree>(&mut self, tree: &T) {
        self.active = None;
        clear_highlights(tree);
    }

    /// Drop the selection if it is not from `generation`. Returns true when
    /// something was dropped.
    pub fn invalidate<T: LiveTree>(&mut self, tree: &T, generation: u64) -> bool {
        match self.active {
            Some(id) if id.generation != generation => {
                log::debug!("selection {} is stale, clearing", id);
                self.clear(tree);
                true
            }
            _ => false,
        }
    }
}

/// Removes the highlight marker from every element that carries it,
/// whoever put it there. Idempotent.
pub fn clear_highlights<T: LiveTree>(tree: &T) {
    for node in tree.elements_with_attribute(HIGHLIGHT_ATTR) {
        tree.remove_attribute(&node, HIGHLIGHT_ATTR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::visual_editor::discoverer::Discoverer;
    use crate::shared::visual_editor::memory_tree::MemoryTree;
    use crate::shared::visual_editor::settings::EditorSettings;

    fn setup() -> (MemoryTree, Registry<usize>, Discoverer) {
        let tree = MemoryTree::new();
        tree.push("section", &[("id", "a")], "A");
        tree.push("section", &[("id", "b")], "B");
        let mut discoverer = Discoverer::new(&EditorSettings::default());
        let registry = discoverer.scan(&tree);
        (tree, registry, discoverer)
    }

    #[test]
    fn test_toggle() {
        let (tree, registry, _) = setup();
        let a = registry.entries()[0].id;
        let mut selection = SelectionController::new();

        assert_eq!(selection.select(&tree, &registry, a), SelectOutcome::Selected(a));
        assert_eq!(tree.attr(0, HIGHLIGHT_ATTR).as_deref(), Some(""));
        assert_eq!(selection.select(&tree, &registry, a), SelectOutcome::Deselected);
        assert_eq!(selection.active(), None);
        assert_eq!(tree.attr(0, HIGHLIGHT_ATTR), None);
        assert_eq!(selection.select(&tree, &registry, a), SelectOutcome::Selected(a));
    }

    #[test]
    fn test_switching_moves_highlight() {
        let (tree, registry, _) = setup();
        let a = registry.entries()[0].id;
        let b = registry.entries()[1].id;
        let mut selection = SelectionController::new();

        selection.select(&tree, &registry, a);
        selection.select(&tree, &registry, b);

        assert_eq!(selection.active(), Some(b));
        assert_eq!(tree.attr(0, HIGHLIGHT_ATTR), None);
        assert!(tree.attr(1, HIGHLIGHT_ATTR).is_some());
    }

    #[test]
    fn test_stale_id_clears() {
        let (tree, old, mut discoverer) = setup();
        let stale = old.entries()[0].id;
        let current = discoverer.scan(&tree);
        let mut selection = SelectionController::new();
        selection.select(&tree, &current, current.entries()[1].id);

        assert_eq!(selection.select(&tree, &current, stale), SelectOutcome::Stale);
        assert_eq!(selection.active(), None);
        assert!(tree.elements_with_attribute(HIGHLIGHT_ATTR).is_empty());
    }

    #[test]
    fn test_clear_highlights_sweeps_untracked_markers() {
        let (tree, _, _) = setup();
        tree.set_attribute(&0, HIGHLIGHT_ATTR, "");
        tree.set_attribute(&1, HIGHLIGHT_ATTR, "");

        clear_highlights(&tree);
        clear_highlights(&tree);
        assert!(tree.elements_with_attribute(HIGHLIGHT_ATTR).is_empty());
    }
}
