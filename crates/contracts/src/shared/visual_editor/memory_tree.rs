//! In-memory [`LiveTree`] used by the editor tests.

use std::cell::RefCell;
use std::collections::BTreeMap;

use super::live_tree::{LiveTree, Rect};

#[derive(Debug, Clone)]
struct MemoryNode {
    tag: String,
    attributes: BTreeMap<String, String>,
    text: String,
    rect: Rect,
    connected: bool,
}

/// Flat element list in document order; node handles are indices.
#[derive(Debug, Default)]
pub struct MemoryTree {
    nodes: RefCell<Vec<MemoryNode>>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a visible 200x40 element.
    pub fn push(&self, tag: &str, attributes: &[(&str, &str)], text: &str) -> usize {
        self.push_with_rect(tag, attributes, text, Rect::new(0.0, 0.0, 200.0, 40.0))
    }

    pub fn push_with_rect(
        &self,
        tag: &str,
        attributes: &[(&str, &str)],
        text: &str,
        rect: Rect,
    ) -> usize {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(MemoryNode {
            tag: tag.to_string(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            text: text.to_string(),
            rect,
            connected: true,
        });
        nodes.len() - 1
    }

    pub fn detach(&self, node: usize) {
        if let Some(n) = self.nodes.borrow_mut().get_mut(node) {
            n.connected = false;
        }
    }

    pub fn attr(&self, node: usize, name: &str) -> Option<String> {
        self.nodes
            .borrow()
            .get(node)
            .and_then(|n| n.attributes.get(name).cloned())
    }
}

impl LiveTree for MemoryTree {
    type Node = usize;

    fn elements(&self, limit: usize) -> Vec<usize> {
        let nodes = self.nodes.borrow();
        (0..nodes.len())
            .filter(|i| nodes[*i].connected)
            .take(limit)
            .collect()
    }

    fn tag_name(&self, node: &usize) -> String {
        self.nodes.borrow()[*node].tag.to_lowercase()
    }

    fn attribute(&self, node: &usize, name: &str) -> Option<String> {
        self.attr(*node, name)
    }

    fn attribute_names(&self, node: &usize) -> Vec<String> {
        self.nodes.borrow()[*node].attributes.keys().cloned().collect()
    }

    fn text_content(&self, node: &usize) -> String {
        self.nodes.borrow()[*node].text.clone()
    }

    fn bounding_box(&self, node: &usize) -> Rect {
        self.nodes.borrow()[*node].rect
    }

    fn is_connected(&self, node: &usize) -> bool {
        self.nodes
            .borrow()
            .get(*node)
            .map(|n| n.connected)
            .unwrap_or(false)
    }

    fn set_attribute(&self, node: &usize, name: &str, value: &str) {
        if let Some(n) = self.nodes.borrow_mut().get_mut(*node) {
            n.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&self, node: &usize, name: &str) {
        if let Some(n) = self.nodes.borrow_mut().get_mut(*node) {
            n.attributes.remove(name);
        }
    }

    fn elements_with_attribute(&self, name: &str) -> Vec<usize> {
        let nodes = self.nodes.borrow();
        (0..nodes.len())
            .filter(|i| nodes[*i].connected && nodes[*i].attributes.contains_key(name))
            .collect()
    }
}
