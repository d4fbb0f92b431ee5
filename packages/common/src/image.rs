use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::limits::{INLINE_IMAGE_MAX_LEN, INLINE_IMAGE_PREFIX};

/// An inline image payload that passed the acceptance rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineImage(String);

impl InlineImage {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Check a raw inline payload against the prefix and length rules.
///
/// Returns `None` for anything that should be dropped. Blank input is
/// treated the same as a malformed payload.
pub fn accept_inline_image(raw: &str) -> Option<InlineImage> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.starts_with(INLINE_IMAGE_PREFIX) {
        return None;
    }
    if raw.len() > INLINE_IMAGE_MAX_LEN {
        return None;
    }
    Some(InlineImage(raw.to_string()))
}

/// Encode raw image bytes as a base64 `data:` URI.
pub fn encode_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}
