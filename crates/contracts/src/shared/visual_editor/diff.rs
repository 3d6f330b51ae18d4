//! Edit buffer and baseline for the active selection.

use serde::{Deserialize, Serialize};

use super::change_set::ChangeSet;
use super::discoverer::AttributeSnapshot;

/// Before/after pair for one changed key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDiff {
    pub key: String,
    pub old: String,
    pub new: String,
}

/// Tracks the baseline captured at selection time and the edited values.
///
/// A key missing from the baseline compares as the empty string, the same
/// value an absent attribute has once applied.
#[derive(Debug, Clone, Default)]
pub struct PropertyDiffEngine {
    baseline: AttributeSnapshot,
    buffer: AttributeSnapshot,
    has_changes: bool,
}

impl PropertyDiffEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing against `baseline`; the buffer starts equal to it.
    pub fn seed(&mut self, baseline: AttributeSnapshot) {
        self.buffer = baseline.clone();
        self.baseline = baseline;
        self.has_changes = false;
    }

    /// Forget baseline and buffer (deselect, rescan).
    pub fn clear(&mut self) {
        self.baseline.clear();
        self.buffer.clear();
        self.has_changes = false;
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        self.buffer.insert(key.into(), value.into());
        self.recompute();
        self.has_changes
    }

    /// Restore the buffer to the baseline.
    pub fn reset(&mut self) {
        self.buffer = self.baseline.clone();
        self.has_changes = false;
    }

    pub fn has_changes(&self) -> bool {
        self.has_changes
    }

    pub fn baseline(&self) -> &AttributeSnapshot {
        &self.baseline
    }

    pub fn buffer(&self) -> &AttributeSnapshot {
        &self.buffer
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.buffer.get(key).map(String::as_str)
    }

    pub fn baseline_value(&self, key: &str) -> &str {
        self.baseline.get(key).map(String::as_str).unwrap_or("")
    }

    /// Changed keys with their before/after values, ordered by key.
    pub fn diff(&self) -> Vec<PropertyDiff> {
        self.buffer
            .iter()
            .filter(|(key, value)| self.baseline_value(key) != value.as_str())
            .map(|(key, value)| PropertyDiff {
                key: key.clone(),
                old: self.baseline_value(key).to_string(),
                new: value.clone(),
            })
            .collect()
    }

    pub fn changed_keys(&self) -> Vec<String> {
        self.diff().into_iter().map(|d| d.key).collect()
    }

    /// Move the baseline forward to the values `change_set` wrote, then
    /// restart the buffer from it. The change-set must target the selection.
    pub fn rebase(&mut self, change_set: &ChangeSet) {
        for change in change_set.changes() {
            self.baseline
                .insert(change.attribute.clone(), change.new_value.clone());
        }
        self.reset();
    }

    fn recompute(&mut self) {
        self.has_changes = self
            .buffer
            .iter()
            .any(|(key, value)| self.baseline_value(key) != value.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> AttributeSnapshot {
        AttributeSnapshot::from([
            ("class".to_string(), "card".to_string()),
            ("id".to_string(), "promo".to_string()),
            ("style".to_string(), String::new()),
            ("data-variant".to_string(), "wide".to_string()),
        ])
    }

    #[test]
    fn test_reset_restores_baseline() {
        let mut engine = PropertyDiffEngine::new();
        engine.seed(baseline());

        engine.set_property("class", "card card--featured");
        engine.set_property("data-extra", "1");
        assert!(engine.has_changes());

        engine.reset();
        assert_eq!(engine.buffer(), &baseline());
        assert_eq!(engine.baseline(), &baseline());
        assert!(!engine.has_changes());
    }

    #[test]
    fn test_has_changes_matches_key_by_key_comparison() {
        let keys = ["class", "id", "style", "data-variant", "data-new"];
        let values = ["", "card", "promo", "wide", "other"];

        for key in keys {
            for value in values {
                let mut engine = PropertyDiffEngine::new();
                engine.seed(baseline());
                engine.set_property(key, value);

                let expected = baseline().get(key).map(String::as_str).unwrap_or("") != value;
                assert_eq!(engine.has_changes(), expected, "{}={:?}", key, value);
                assert_eq!(engine.changed_keys().len(), expected as usize);
            }
        }
    }

    #[test]
    fn test_edit_back_to_baseline_clears_flag() {
        let mut engine = PropertyDiffEngine::new();
        engine.seed(baseline());

        assert!(engine.set_property("id", "promo-2"));
        assert!(!engine.set_property("id", "promo"));
    }

    #[test]
    fn test_diff_keeps_before_and_after() {
        let mut engine = PropertyDiffEngine::new();
        engine.seed(baseline());
        engine.set_property("style", "color: red");
        engine.set_property("class", "card");

        assert_eq!(
            engine.diff(),
            vec![PropertyDiff {
                key: "style".to_string(),
                old: String::new(),
                new: "color: red".to_string(),
            }]
        );
    }
}
