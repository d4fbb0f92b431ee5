pub mod image;
pub mod limits;
pub mod location;
pub mod text;

pub use image::{InlineImage, accept_inline_image, encode_data_url};
pub use location::feed_location;
pub use text::{clip, normalize_optional, normalize_required};
