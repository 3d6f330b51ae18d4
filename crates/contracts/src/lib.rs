pub mod domain {
    pub mod a001_content;
    pub mod common;
}

pub mod shared {
    pub mod sitemap;
    pub mod visual_editor;
}
