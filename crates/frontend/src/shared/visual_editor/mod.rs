//! Visual editor page: preview iframe, component list, property form.

pub mod dom_tree;
pub mod model;
pub mod view;
pub mod view_model;

pub use view::VisualEditorPage;
