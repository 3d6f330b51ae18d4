pub mod a001_content;
