//! Abstraction over the rendered element tree the editor inspects.
//!
//! The tree is owned by the rendered page, never by the editor. Node handles
//! returned from [`LiveTree::elements`] are only meaningful while the scan that
//! produced them is current; callers check [`LiveTree::is_connected`] before
//! writing through a handle.

use serde::{Deserialize, Serialize};

/// Explicit editability annotation (phase 1 of discovery).
pub const EDITABLE_ATTR: &str = "data-editable";
/// Explicit `file:line` source annotation.
pub const SOURCE_ATTR: &str = "data-source";
/// Marker carried by highlighted elements.
pub const HIGHLIGHT_ATTR: &str = "data-ve-highlight";

/// Editor bookkeeping attributes, never part of an attribute snapshot.
pub const BOOKKEEPING_ATTRS: [&str; 3] = [EDITABLE_ATTR, SOURCE_ATTR, HIGHLIGHT_ATTR];

/// Attributes every snapshot carries, present or not.
pub const CORE_ATTRS: [&str; 3] = ["class", "id", "style"];

/// Можно ли редактировать атрибут: class, id, style и data-* (кроме служебных)
pub fn is_editable_attribute(name: &str) -> bool {
    CORE_ATTRS.contains(&name)
        || (name.starts_with("data-") && !BOOKKEEPING_ATTRS.contains(&name))
}

/// Rendered bounding box in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_visible(&self, min_size: f64) -> bool {
        self.width >= min_size && self.height >= min_size
    }
}

/// Read/write access to a live element tree.
///
/// Mutating methods take `&self`: the tree is shared with the page that renders
/// it, so implementations use interior mutability (the DOM already does).
pub trait LiveTree {
    /// Handle to one element. Equal handles name the same element.
    type Node: Clone + PartialEq;

    /// Elements in document order, at most `limit` of them.
    fn elements(&self, limit: usize) -> Vec<Self::Node>;

    /// Lowercase tag name.
    fn tag_name(&self, node: &Self::Node) -> String;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn attribute_names(&self, node: &Self::Node) -> Vec<String>;

    fn text_content(&self, node: &Self::Node) -> String;

    fn bounding_box(&self, node: &Self::Node) -> Rect;

    /// False once the element has been removed from the page.
    fn is_connected(&self, node: &Self::Node) -> bool;

    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);

    fn remove_attribute(&self, node: &Self::Node, name: &str);

    /// Every element currently carrying attribute `name`.
    fn elements_with_attribute(&self, name: &str) -> Vec<Self::Node>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editable_attributes() {
        assert!(is_editable_attribute("class"));
        assert!(is_editable_attribute("data-variant"));
        assert!(!is_editable_attribute("title"));
        assert!(!is_editable_attribute("onclick"));
        assert!(!is_editable_attribute(SOURCE_ATTR));
        assert!(!is_editable_attribute(HIGHLIGHT_ATTR));
    }
}
