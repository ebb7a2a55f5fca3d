//! Image intake: reads an uploaded photo into an in-memory payload.

use std::path::Path;

use base64::Engine;

use crate::error::ReviveError;

/// An uploaded photo, ready for transmission.
///
/// Replaced wholesale on each new upload, never mutated in place.
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// Raw file bytes as read from disk.
    pub raw_bytes: Vec<u8>,
    /// Detected MIME type.
    pub mime_type: String,
    /// Base64 encoding of `raw_bytes`, ready to embed in a request body.
    pub encoded_payload: String,
}

/// Read a photo from disk and produce a [`SourceImage`].
///
/// The MIME type is sniffed from the file contents, falling back to the file
/// extension. No type or size validation beyond readability is performed;
/// the remote service is the final judge of what it accepts.
///
/// # Errors
///
/// Returns [`ReviveError::Read`] if the file cannot be read.
pub fn submit_file(path: &Path) -> Result<SourceImage, ReviveError> {
    let raw_bytes = std::fs::read(path).map_err(ReviveError::Read)?;
    let mime_type = detect_mime_type(&raw_bytes, path);
    let encoded_payload = base64::engine::general_purpose::STANDARD.encode(&raw_bytes);
    Ok(SourceImage { raw_bytes, mime_type, encoded_payload })
}

/// Sniff the MIME type from magic bytes, falling back to the extension.
fn detect_mime_type(bytes: &[u8], path: &Path) -> String {
    if let Ok(format) = image::guess_format(bytes) {
        return format.to_mime_type().to_string();
    }
    mime_from_extension(path).unwrap_or("application/octet-stream").to_string()
}

/// Map a file extension to a MIME type.
fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        "tif" | "tiff" => Some("image/tiff"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn tiny_png() -> Vec<u8> {
        let img = image::DynamicImage::new_rgb8(1, 1);
        let mut buf = std::io::Cursor::new(Vec::<u8>::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn submit_png_detects_mime_and_encodes() {
        let dir = std::env::temp_dir().join("reviver_intake_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("photo.png");
        let bytes = tiny_png();
        std::fs::write(&path, &bytes).unwrap();

        let source = submit_file(&path).unwrap();
        assert_eq!(source.mime_type, "image/png");
        assert_eq!(source.raw_bytes, bytes);
        let decoded =
            base64::engine::general_purpose::STANDARD.decode(&source.encoded_payload).unwrap();
        assert_eq!(decoded, bytes);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn submit_missing_file_is_read_error() {
        let err = submit_file(Path::new("/nonexistent/photo.jpg")).unwrap_err();
        assert!(matches!(err, ReviveError::Read(_)));
        assert_eq!(err.to_string(), "Failed to read the image file");
    }

    #[test]
    fn unknown_bytes_fall_back_to_extension() {
        let mime = detect_mime_type(b"not an image", &PathBuf::from("old-scan.jpeg"));
        assert_eq!(mime, "image/jpeg");
    }

    #[test]
    fn unknown_bytes_and_extension_fall_back_to_octet_stream() {
        let mime = detect_mime_type(b"not an image", &PathBuf::from("mystery.dat"));
        assert_eq!(mime, "application/octet-stream");
    }

    #[test]
    fn sniffed_mime_wins_over_extension() {
        // A PNG saved with a .jpg extension is still reported as PNG.
        let mime = detect_mime_type(&tiny_png(), &PathBuf::from("mislabeled.jpg"));
        assert_eq!(mime, "image/png");
    }
}
