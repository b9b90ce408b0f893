//! Client-side receipt validation, enforced before any upload round-trip.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Hard cap on receipt images.
pub const MAX_RECEIPT_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("file is {0} bytes; receipts are capped at 5MB")]
    TooLarge(u64),
    #[error("\"{0}\" is not an image file")]
    NotAnImage(String),
    #[error("could not read file: {0}")]
    Io(#[from] std::io::Error),
}

/// A receipt read from disk and cleared for upload.
#[derive(Debug, Clone)]
pub struct ReceiptFile {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub extension: String,
    pub content_type: &'static str,
}

/// Content type by file extension; `None` when the file is not an image.
fn image_content_type(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}

fn check_size(len: u64) -> Result<(), UploadError> {
    if len > MAX_RECEIPT_BYTES {
        return Err(UploadError::TooLarge(len));
    }
    Ok(())
}

/// Reads and validates a receipt. The size check runs on metadata first so an
/// oversized file is rejected without reading it.
pub fn load_receipt(path: &str) -> Result<ReceiptFile, UploadError> {
    let path = Path::new(path);
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default();

    let content_type =
        image_content_type(&extension).ok_or_else(|| UploadError::NotAnImage(filename.clone()))?;

    check_size(fs::metadata(path)?.len())?;
    let bytes = fs::read(path)?;

    Ok(ReceiptFile {
        bytes,
        filename,
        extension,
        content_type,
    })
}

/// Object path for an uploaded receipt, e.g. `receipts/<entry>/1712345678901.png`.
pub fn receipt_object_path(scope: &str, extension: &str, now: DateTime<Utc>) -> String {
    format!("{scope}/{}.{extension}", now.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn size_gate_rejects_over_cap() {
        assert!(check_size(MAX_RECEIPT_BYTES).is_ok());
        assert!(matches!(
            check_size(MAX_RECEIPT_BYTES + 1),
            Err(UploadError::TooLarge(_))
        ));
    }

    #[test]
    fn only_image_extensions_pass() {
        assert_eq!(image_content_type("png"), Some("image/png"));
        assert_eq!(image_content_type("JPG"), Some("image/jpeg"));
        assert_eq!(image_content_type("pdf"), None);
        assert_eq!(image_content_type(""), None);
    }

    #[test]
    fn non_image_file_is_rejected_before_any_io() {
        let err = load_receipt("/no/such/receipt.pdf").unwrap_err();
        assert!(matches!(err, UploadError::NotAnImage(_)));
    }

    #[test]
    fn object_path_is_scope_timestamp_extension() {
        let now = Utc.with_ymd_and_hms(2025, 4, 1, 12, 0, 0).unwrap();
        let path = receipt_object_path("receipts/abc", "png", now);
        assert_eq!(path, format!("receipts/abc/{}.png", now.timestamp_millis()));
    }
}
