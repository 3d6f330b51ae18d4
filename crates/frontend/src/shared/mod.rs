pub mod api_utils;
pub mod rich_text;
pub mod visual_editor;
