pub mod a001_content;
pub mod sitemap;
pub mod visual_editor;
