//! Turning an uploaded label photo into the image payload sent to the model.

use crate::ai::mime;
use crate::models::{ImageParts, ImagePayload, UploadedImage, DECLARED_IMAGE_MIME};
use crate::{Error, Result};
use base64::Engine as _;
use std::path::Path;

/// Extensions the upload form accepts.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

pub const MISSING_IMAGE_MESSAGE: &str = "Please upload your image...";

/// Wraps the uploaded bytes into a one-element list of image payloads.
///
/// Fails with [`Error::MissingInput`] when nothing (or an empty file) was
/// uploaded. The payload is always declared as `image/jpeg`.
pub fn image_parts(upload: Option<&UploadedImage>) -> Result<ImageParts> {
    let upload = match upload {
        Some(upload) if !upload.bytes.is_empty() => upload,
        _ => return Err(Error::MissingInput(MISSING_IMAGE_MESSAGE.to_string())),
    };

    check_extension(upload.file_name.as_deref())?;
    mime::warn_on_mismatch(&upload.bytes, DECLARED_IMAGE_MIME);

    Ok(vec![ImagePayload {
        mime_type: DECLARED_IMAGE_MIME.to_string(),
        data: base64::engine::general_purpose::STANDARD.encode(&upload.bytes),
    }])
}

/// Single payload taken from [`image_parts`].
pub fn image_payload(upload: Option<&UploadedImage>) -> Result<ImagePayload> {
    image_parts(upload)?
        .into_iter()
        .next()
        .ok_or_else(|| Error::MissingInput(MISSING_IMAGE_MESSAGE.to_string()))
}

fn check_extension(file_name: Option<&str>) -> Result<()> {
    let Some(file_name) = file_name.filter(|name| !name.is_empty()) else {
        return Ok(());
    };

    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension {
        Some(ext) if ACCEPTED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(Error::InvalidInput(format!(
            "'{}' is not a JPEG or PNG image",
            file_name
        ))),
    }
}

/// `data:` URL used to preview the upload on the page.
///
/// Uses the sniffed format so PNG previews render correctly.
pub fn preview_data_url(bytes: &[u8]) -> String {
    let mime_type = mime::sniff_image_mime(bytes).unwrap_or(DECLARED_IMAGE_MIME);
    format!(
        "data:{};base64,{}",
        mime_type,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}
