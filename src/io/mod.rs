//! I/O layer: background template loading and the writers for cropped images
//! and multi-page PDF output.
pub mod template;
pub use template::{load_template, resource_path};

pub mod writers;
