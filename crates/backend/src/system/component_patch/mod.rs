//! Journal of component patches received from the visual editor.

pub mod repository;
pub mod service;
