//! Image loading for vision requests

use crate::error::LlmError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::Path;

/// An image file ready to be embedded in a content block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub media_type: &'static str,
    pub data: String,
}

/// Guess the media type from the file extension alone.
///
/// The file contents are never inspected; anything that is not a known
/// extension is tagged `image/jpeg`.
pub fn media_type_for_path(path: &Path) -> &'static str {
    let name = path.to_string_lossy().to_lowercase();

    if name.ends_with(".png") {
        "image/png"
    } else if name.ends_with(".jpg") || name.ends_with(".jpeg") {
        "image/jpeg"
    } else if name.ends_with(".gif") {
        "image/gif"
    } else if name.ends_with(".webp") {
        "image/webp"
    } else {
        "image/jpeg"
    }
}

/// Read a whole image file and base64-encode it
pub async fn load_image(path: &Path) -> Result<EncodedImage, LlmError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| LlmError::io(path.display().to_string(), e))?;

    Ok(EncodedImage {
        media_type: media_type_for_path(path),
        data: STANDARD.encode(bytes),
    })
}
