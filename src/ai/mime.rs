//! Magic-byte sniffing for uploaded label images.

/// Returns the mime type implied by the leading bytes, if recognized.
pub fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, 0x50, 0x4E, 0x47, ..] => Some("image/png"),
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Some("image/webp"),
        _ => None,
    }
}

/// Logs a warning when the sniffed format disagrees with the declared one.
///
/// Returns `true` when a mismatch was found.
pub fn warn_on_mismatch(bytes: &[u8], declared: &str) -> bool {
    match sniff_image_mime(bytes) {
        Some(actual) if actual != declared => {
            tracing::warn!(
                "Uploaded image looks like {} but is declared as {}",
                actual,
                declared
            );
            true
        }
        Some(_) => false,
        None => {
            tracing::warn!(
                "Unrecognized image format (first 4 bytes: {:02X?}), declaring as {}",
                &bytes[..bytes.len().min(4)],
                declared
            );
            false
        }
    }
}
