//! Saving the revived photo as a PNG file.

use std::path::{Path, PathBuf};

use crate::error::ReviveError;

/// Default filename for the delivered result.
pub const DEFAULT_OUTPUT_FILENAME: &str = "revived-photo.png";

/// Resolve the output path: use the explicit path or the fixed default name.
#[must_use]
pub fn resolve_output_path(explicit: Option<&str>) -> PathBuf {
    match explicit {
        Some(p) => PathBuf::from(p),
        None => PathBuf::from(DEFAULT_OUTPUT_FILENAME),
    }
}

/// Save image bytes to a file as PNG.
///
/// The actual encoding is sniffed from the bytes rather than trusting any
/// declared MIME type: bytes already in PNG form are written as-is, anything
/// else is decoded and re-encoded as PNG.
///
/// # Errors
///
/// Returns an error if the bytes are not a decodable image or the file
/// cannot be written.
pub fn save_png(data: &[u8], output_path: &Path) -> Result<(), ReviveError> {
    if matches!(image::guess_format(data), Ok(image::ImageFormat::Png)) {
        return std::fs::write(output_path, data).map_err(ReviveError::Io);
    }

    let img = image::load_from_memory(data)
        .map_err(|e| ReviveError::ImageConversion(format!("Failed to decode image: {e}")))?;
    img.save_with_format(output_path, image::ImageFormat::Png)
        .map_err(|e| ReviveError::ImageConversion(format!("Failed to save as png: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(format: image::ImageFormat) -> Vec<u8> {
        let img = image::DynamicImage::new_rgb8(1, 1);
        let mut buf = std::io::Cursor::new(Vec::<u8>::new());
        img.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn resolve_explicit() {
        let path = resolve_output_path(Some("my-photo.png"));
        assert_eq!(path, PathBuf::from("my-photo.png"));
    }

    #[test]
    fn resolve_default() {
        let path = resolve_output_path(None);
        assert_eq!(path, PathBuf::from("revived-photo.png"));
    }

    #[test]
    fn png_bytes_written_verbatim() {
        let dir = std::env::temp_dir().join("reviver_output_png_test");
        std::fs::create_dir_all(&dir).unwrap();
        let out = dir.join("out.png");

        let bytes = encode(image::ImageFormat::Png);
        save_png(&bytes, &out).unwrap();
        assert_eq!(std::fs::read(&out).unwrap(), bytes);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn jpeg_bytes_converted_to_png() {
        let dir = std::env::temp_dir().join("reviver_output_jpeg_test");
        std::fs::create_dir_all(&dir).unwrap();
        let out = dir.join("out.png");

        let bytes = encode(image::ImageFormat::Jpeg);
        save_png(&bytes, &out).unwrap();
        let written = std::fs::read(&out).unwrap();
        assert_eq!(&written[..8], &PNG_MAGIC);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn undecodable_bytes_error() {
        let dir = std::env::temp_dir().join("reviver_output_bad_test");
        std::fs::create_dir_all(&dir).unwrap();
        let out = dir.join("out.png");

        let err = save_png(b"definitely not an image", &out).unwrap_err();
        assert!(matches!(err, ReviveError::ImageConversion(_)));
        assert!(!out.exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
