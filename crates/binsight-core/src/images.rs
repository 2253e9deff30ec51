//! Image file loading and data-URI encoding for the predict endpoint.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use base64::prelude::*;

/// Maximum accepted image size. The backend inlines the payload into JSON,
/// so oversized files are rejected up front.
const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

/// Reads an image file and produces the `data:<mime>;base64,<payload>`
/// string the predict endpoint expects.
pub fn encode_data_uri(path: &Path) -> Result<String> {
    let metadata =
        fs::metadata(path).with_context(|| format!("read image {}", path.display()))?;
    if metadata.len() > MAX_IMAGE_BYTES {
        bail!(
            "image {} is too large ({} bytes, max {})",
            path.display(),
            metadata.len(),
            MAX_IMAGE_BYTES
        );
    }

    let bytes = fs::read(path).with_context(|| format!("read image {}", path.display()))?;
    let mime = mime_type_for_path(path).unwrap_or("image/jpeg");
    Ok(format!("data:{mime};base64,{}", BASE64_STANDARD.encode(bytes)))
}

/// Returns MIME type inferred from file extension for supported image formats.
pub fn mime_type_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension().and_then(|e| e.to_str())?;

    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
