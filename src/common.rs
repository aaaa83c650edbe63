mod class_table;
mod detection;
mod detector_config;
mod error;
mod layout_box;
mod letterbox_mapping;
mod source_image;

pub use class_table::*;
pub use detection::*;
pub use detector_config::*;
pub use error::*;
pub use layout_box::*;
pub use letterbox_mapping::*;
pub use source_image::*;
