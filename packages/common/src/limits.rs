//! Fixed bounds applied at the submission boundary.

/// Maximum length of a submitter name, in characters.
pub const NAME_MAX_CHARS: usize = 100;
/// Maximum length of a prompt, in characters.
pub const PROMPT_MAX_CHARS: usize = 5_000;
/// Maximum length of a model result, in characters.
pub const RESULT_MAX_CHARS: usize = 10_000;

/// Ceiling on the encoded length of an inline image payload.
pub const INLINE_IMAGE_MAX_LEN: usize = 2_000_000;
/// Every accepted inline image payload starts with this marker.
pub const INLINE_IMAGE_PREFIX: &str = "data:image/";

/// Number of submissions shown on one feed page.
pub const FEED_PAGE_SIZE: u64 = 100;

/// Largest width or height the browser keeps after downscaling a capture.
pub const CAPTURE_MAX_DIMENSION: u32 = 1280;
/// JPEG quality the browser re-encodes captures with.
pub const CAPTURE_JPEG_QUALITY: f32 = 0.8;

/// Bounds on the number of images requested per prompt in the image lab.
pub const GENERATION_MIN_COUNT: u32 = 1;
pub const GENERATION_MAX_COUNT: u32 = 4;
