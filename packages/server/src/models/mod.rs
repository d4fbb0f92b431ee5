pub mod image_lab;
pub mod submission;
