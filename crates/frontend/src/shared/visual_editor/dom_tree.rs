//! [`LiveTree`] over the document rendered inside the preview iframe.

use contracts::shared::visual_editor::live_tree::HIGHLIGHT_ATTR;
use contracts::shared::visual_editor::{LiveTree, Rect};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlIFrameElement};

const HIGHLIGHT_STYLE_ID: &str = "ve-highlight-style";

/// The preview document. Cloning shares the same underlying DOM.
#[derive(Clone)]
pub struct DomTree {
    document: Document,
}

impl DomTree {
    /// `None` when the iframe has no document or it is cross-origin.
    pub fn from_iframe(iframe: &HtmlIFrameElement) -> Option<Self> {
        let document = iframe.content_document()?;
        let tree = Self { document };
        tree.install_highlight_style();
        Some(tree)
    }

    fn install_highlight_style(&self) {
        if self.document.get_element_by_id(HIGHLIGHT_STYLE_ID).is_some() {
            return;
        }
        let Some(head) = self.document.head() else {
            return;
        };
        match self.document.create_element("style") {
            Ok(style) => {
                style.set_id(HIGHLIGHT_STYLE_ID);
                style.set_text_content(Some(&format!(
                    "[{attr}] {{ outline: 2px solid #2563eb !important; outline-offset: 2px; }}",
                    attr = HIGHLIGHT_ATTR
                )));
                if let Err(e) = head.append_child(&style) {
                    log::warn!("Cannot install highlight style: {:?}", e);
                }
            }
            Err(e) => log::warn!("Cannot create highlight style: {:?}", e),
        }
    }

    fn query_all(&self, selector: &str, limit: usize) -> Vec<Element> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(e) => {
                log::warn!("querySelectorAll({}) failed: {:?}", selector, e);
                return Vec::new();
            }
        };
        let len = (list.length() as usize).min(limit);
        (0..len)
            .filter_map(|i| list.get(i as u32))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }
}

impl LiveTree for DomTree {
    type Node = Element;

    fn elements(&self, limit: usize) -> Vec<Element> {
        self.query_all("body *", limit)
    }

    fn tag_name(&self, node: &Element) -> String {
        node.tag_name().to_lowercase()
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn attribute_names(&self, node: &Element) -> Vec<String> {
        node.get_attribute_names()
            .iter()
            .filter_map(|v| v.as_string())
            .collect()
    }

    fn text_content(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn bounding_box(&self, node: &Element) -> Rect {
        let r = node.get_bounding_client_rect();
        Rect::new(r.x(), r.y(), r.width(), r.height())
    }

    fn is_connected(&self, node: &Element) -> bool {
        node.is_connected()
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        if let Err(e) = node.set_attribute(name, value) {
            log::warn!("setAttribute({}) failed: {:?}", name, e);
        }
    }

    fn remove_attribute(&self, node: &Element, name: &str) {
        if let Err(e) = node.remove_attribute(name) {
            log::warn!("removeAttribute({}) failed: {:?}", name, e);
        }
    }

    fn elements_with_attribute(&self, name: &str) -> Vec<Element> {
        self.query_all(&format!("[{}]", name), usize::MAX)
    }
}
