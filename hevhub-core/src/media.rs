//! Client-side image pre-validation, run before any network call.

use std::path::Path;

use crate::constants::MAX_IMAGE_BYTES;
use crate::error::ValidationError;

/// Check an upload candidate against the media endpoint's limits:
/// MIME type must be `image/*` and size at most 5 MiB.
pub fn validate_image(mime: &str, size_bytes: u64) -> Result<(), ValidationError> {
    if !mime.starts_with("image/") {
        return Err(ValidationError::NotAnImage);
    }
    if size_bytes > MAX_IMAGE_BYTES {
        return Err(ValidationError::ImageTooLarge);
    }
    Ok(())
}

/// MIME type for an image file by extension. None for anything the hub
/// doesn't accept.
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn images_within_the_limit_pass() {
        assert!(validate_image("image/jpeg", 1024).is_ok());
        assert!(validate_image("image/png", MAX_IMAGE_BYTES).is_ok());
    }

    #[test]
    fn non_images_are_rejected() {
        assert_eq!(
            validate_image("application/pdf", 1024),
            Err(ValidationError::NotAnImage)
        );
        assert_eq!(validate_image("", 1024), Err(ValidationError::NotAnImage));
    }

    #[test]
    fn oversized_images_are_rejected() {
        assert_eq!(
            validate_image("image/jpeg", MAX_IMAGE_BYTES + 1),
            Err(ValidationError::ImageTooLarge)
        );
    }

    #[test]
    fn mime_lookup_covers_accepted_extensions() {
        assert_eq!(
            mime_for_path(&PathBuf::from("poster.JPG")),
            Some("image/jpeg")
        );
        assert_eq!(
            mime_for_path(&PathBuf::from("poster.webp")),
            Some("image/webp")
        );
        assert_eq!(mime_for_path(&PathBuf::from("poster.pdf")), None);
        assert_eq!(mime_for_path(&PathBuf::from("poster")), None);
    }
}
