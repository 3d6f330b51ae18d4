//! Component discovery over the live tree.
//!
//! Two tiers, evaluated in order, first non-empty tier wins:
//!   1. elements carrying an explicit `data-editable` annotation;
//!   2. the structural matchers in [`STRUCTURAL_MATCHERS`], unioned in
//!      priority order, deduplicated, then filtered by rendered size.
//!
//! Scanning only reads the tree.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::live_tree::{is_editable_attribute, LiveTree, CORE_ATTRS, EDITABLE_ATTR, SOURCE_ATTR};
use super::settings::EditorSettings;

const EXCERPT_LEN: usize = 80;

/// Attribute name → value. Ordered so snapshots and diffs are deterministic.
pub type AttributeSnapshot = BTreeMap<String, String>;

/// Registry id, unique across generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId {
    pub generation: u64,
    pub index: u32,
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}-{}", self.generation, self.index)
    }
}

/// Where an entry's markup lives: an explicit `file:line` annotation, or an
/// identifier synthesized from the element id / classes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceHint {
    pub value: String,
    pub explicit: bool,
}

impl fmt::Display for SourceHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Найденный редактируемый элемент
#[derive(Debug, Clone)]
pub struct ComponentEntry<N> {
    pub id: EntryId,
    pub tag_name: String,
    pub source_hint: SourceHint,
    pub excerpt: String,
    pub attributes: AttributeSnapshot,
    node: N,
}

impl<N> ComponentEntry<N> {
    /// Handle to the live element. Valid only while `id.generation` is current.
    pub fn node(&self) -> &N {
        &self.node
    }
}

/// Реестр одного сканирования (поколения)
///
/// Replaced as a whole by the next scan.
#[derive(Debug, Clone)]
pub struct Registry<N> {
    generation: u64,
    entries: Vec<ComponentEntry<N>>,
    truncated: bool,
}

impl<N> Registry<N> {
    /// Registry before the first scan.
    pub fn empty() -> Self {
        Self {
            generation: 0,
            entries: Vec::new(),
            truncated: false,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn entries(&self) -> &[ComponentEntry<N>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when a cap cut the scan short.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Lookup that refuses ids from other generations.
    pub fn get(&self, id: EntryId) -> Option<&ComponentEntry<N>> {
        if id.generation != self.generation {
            return None;
        }
        self.entries.get(id.index as usize)
    }

    pub fn by_source<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a ComponentEntry<N>> {
        self.entries
            .iter()
            .filter(move |e| e.source_hint.value == source)
    }
}

impl<N: PartialEq> Registry<N> {
    /// Entry of this generation wrapping `node`, if any.
    pub fn by_node(&self, node: &N) -> Option<&ComponentEntry<N>> {
        self.entries.iter().find(|e| &e.node == node)
    }

    /// Re-reads the attribute snapshot of the entry wrapping `node`. Ids and
    /// generation stay the same.
    pub fn refresh_snapshot<T>(&mut self, tree: &T, node: &N)
    where
        T: LiveTree<Node = N>,
    {
        if !tree.is_connected(node) {
            return;
        }
        if let Some(entry) = self.entries.iter_mut().find(|e| &e.node == node) {
            entry.attributes = snapshot_attributes(tree, node);
        }
    }
}

// ── Structural matchers ──────────────────────────────────────────────────────

/// What a structural matcher may look at.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementFacts {
    pub tag: String,
    pub classes: Vec<String>,
    pub role: Option<String>,
}

/// Named predicate in the structural tier.
#[derive(Clone, Copy)]
pub struct Matcher {
    pub name: &'static str,
    pub predicate: fn(&ElementFacts) -> bool,
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher").field("name", &self.name).finish()
    }
}

/// Structural tier, highest priority first.
pub const STRUCTURAL_MATCHERS: [Matcher; 3] = [
    Matcher {
        name: "semantic_tag",
        predicate: is_semantic_tag,
    },
    Matcher {
        name: "class_pattern",
        predicate: has_component_class,
    },
    Matcher {
        name: "interactive",
        predicate: is_interactive,
    },
];

const SEMANTIC_TAGS: [&str; 17] = [
    "section",
    "header",
    "footer",
    "nav",
    "main",
    "article",
    "aside",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "p",
    "img",
    "figure",
    "blockquote",
];

const COMPONENT_CLASS_PATTERNS: [&str; 9] = [
    "card",
    "hero",
    "banner",
    "section",
    "block",
    "container",
    "component",
    "widget",
    "btn",
];

const INTERACTIVE_TAGS: [&str; 5] = ["a", "button", "input", "select", "textarea"];

pub fn is_semantic_tag(facts: &ElementFacts) -> bool {
    SEMANTIC_TAGS.contains(&facts.tag.as_str())
}

pub fn has_component_class(facts: &ElementFacts) -> bool {
    facts.classes.iter().any(|class| {
        let class = class.to_lowercase();
        COMPONENT_CLASS_PATTERNS.iter().any(|p| class.contains(p))
    })
}

pub fn is_interactive(facts: &ElementFacts) -> bool {
    INTERACTIVE_TAGS.contains(&facts.tag.as_str()) || facts.role.as_deref() == Some("button")
}

pub fn is_annotated<T: LiveTree>(tree: &T, node: &T::Node) -> bool {
    tree.attribute(node, EDITABLE_ATTR)
        .map(|v| v.trim() != "false")
        .unwrap_or(false)
}

// ── Discoverer ───────────────────────────────────────────────────────────────

/// Produces registries with monotonically increasing generations.
#[derive(Debug, Clone)]
pub struct Discoverer {
    generation: u64,
    max_candidates: usize,
    max_entries: usize,
    min_visible_size: f64,
}

impl Discoverer {
    pub fn new(settings: &EditorSettings) -> Self {
        Self {
            generation: 0,
            max_candidates: settings.max_candidates.max(1),
            max_entries: settings.max_entries.max(1),
            min_visible_size: settings.min_visible_size,
        }
    }

    /// Generation of the most recent scan (0 before the first one).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn scan<T: LiveTree>(&mut self, tree: &T) -> Registry<T::Node> {
        self.generation += 1;
        let generation = self.generation;

        let mut truncated = false;
        let mut candidates = tree.elements(self.max_candidates + 1);
        if candidates.len() > self.max_candidates {
            log::warn!(
                "scan g{}: more than {} elements, truncating",
                generation,
                self.max_candidates
            );
            candidates.truncate(self.max_candidates);
            truncated = true;
        }

        let annotated: Vec<usize> = candidates
            .iter()
            .enumerate()
            .filter(|(_, node)| is_annotated(tree, node))
            .map(|(i, _)| i)
            .collect();

        let mut picked = if annotated.is_empty() {
            log::debug!("scan g{}: no annotated elements, using structural matchers", generation);
            self.structural_matches(tree, &candidates)
        } else {
            annotated
        };

        if picked.len() > self.max_entries {
            log::warn!(
                "scan g{}: {} matches, keeping the first {}",
                generation,
                picked.len(),
                self.max_entries
            );
            picked.truncate(self.max_entries);
            truncated = true;
        }

        let entries = picked
            .into_iter()
            .enumerate()
            .map(|(index, candidate)| {
                let node = candidates[candidate].clone();
                build_entry(tree, node, generation, index as u32, candidate)
            })
            .collect::<Vec<_>>();

        log::debug!("scan g{}: {} entries", generation, entries.len());

        Registry {
            generation,
            entries,
            truncated,
        }
    }

    fn structural_matches<T: LiveTree>(&self, tree: &T, candidates: &[T::Node]) -> Vec<usize> {
        let facts: Vec<ElementFacts> = candidates.iter().map(|n| element_facts(tree, n)).collect();

        let mut seen = HashSet::new();
        let mut picked = Vec::new();
        for matcher in STRUCTURAL_MATCHERS.iter() {
            for (i, f) in facts.iter().enumerate() {
                if !seen.contains(&i) && (matcher.predicate)(f) {
                    seen.insert(i);
                    picked.push(i);
                }
            }
        }

        picked.retain(|i| {
            tree.bounding_box(&candidates[*i])
                .is_visible(self.min_visible_size)
        });
        picked
    }
}

pub fn element_facts<T: LiveTree>(tree: &T, node: &T::Node) -> ElementFacts {
    ElementFacts {
        tag: tree.tag_name(node),
        classes: tree
            .attribute(node, "class")
            .map(|c| c.split_whitespace().map(String::from).collect())
            .unwrap_or_default(),
        role: tree.attribute(node, "role"),
    }
}

/// Current attributes of `node`: class, id and style (empty when absent) plus
/// every `data-*` attribute that is not editor bookkeeping.
pub fn snapshot_attributes<T: LiveTree>(tree: &T, node: &T::Node) -> AttributeSnapshot {
    let mut snapshot: AttributeSnapshot = CORE_ATTRS
        .iter()
        .map(|name| {
            (
                name.to_string(),
                tree.attribute(node, name).unwrap_or_default(),
            )
        })
        .collect();

    for name in tree.attribute_names(node) {
        if name.starts_with("data-") && is_editable_attribute(&name) {
            let value = tree.attribute(node, &name).unwrap_or_default();
            snapshot.insert(name, value);
        }
    }
    snapshot
}

fn build_entry<T: LiveTree>(
    tree: &T,
    node: T::Node,
    generation: u64,
    index: u32,
    position: usize,
) -> ComponentEntry<T::Node> {
    let tag_name = tree.tag_name(&node);
    let attributes = snapshot_attributes(tree, &node);
    let source_hint = source_hint(tree, &node, &tag_name, &attributes, position);
    let excerpt = excerpt(&tree.text_content(&node));

    ComponentEntry {
        id: EntryId { generation, index },
        tag_name,
        source_hint,
        excerpt,
        attributes,
        node,
    }
}

fn source_hint<T: LiveTree>(
    tree: &T,
    node: &T::Node,
    tag: &str,
    attributes: &AttributeSnapshot,
    position: usize,
) -> SourceHint {
    if let Some(source) = tree.attribute(node, SOURCE_ATTR) {
        let source = source.trim();
        if !source.is_empty() {
            return SourceHint {
                value: source.to_string(),
                explicit: true,
            };
        }
    }

    let id = attributes.get("id").map(|s| s.trim()).unwrap_or_default();
    let value = if !id.is_empty() {
        format!("{}#{}", tag, id)
    } else {
        let classes: Vec<&str> = attributes
            .get("class")
            .map(|c| c.split_whitespace().take(2).collect())
            .unwrap_or_default();
        if classes.is_empty() {
            // Position in document order keeps bare tags apart.
            format!("{}[{}]", tag, position)
        } else {
            format!("{}.{}", tag, classes.join("."))
        }
    };

    SourceHint {
        value,
        explicit: false,
    }
}

fn excerpt(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= EXCERPT_LEN {
        collapsed
    } else {
        let mut cut: String = collapsed.chars().take(EXCERPT_LEN).collect();
        cut.push('…');
        cut
    }
}
