pub mod image_data;

pub use image_data::{ImageCategory, ImageData, ImageEntry, InputError};
