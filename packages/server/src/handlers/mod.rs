pub mod assets;
pub mod feed;
pub mod image_lab;
