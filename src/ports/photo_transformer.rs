//! Photo transformer port for the remote modernization API.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::ReviveError;
use crate::intake::SourceImage;

/// The fixed instruction sent alongside every photo.
///
/// This is the entire "business logic" payload of the transform call. It is
/// a constant by design: the user picks the photo, never the directive.
pub const INSTRUCTION_TEXT: &str = "recreate this photo as a realistic modern \
high-quality portrait, preserving the same face with near-total likeness, \
upgrading color, skin texture, lighting, outfit, and background to a \
contemporary aesthetic while keeping the original pose and expression.";

/// Default model identifier for the transform service.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";

/// A request to modernize one photo.
///
/// Constructed per call from the current [`SourceImage`] and never retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformRequest {
    /// The resolved model identifier.
    pub model: String,
    /// Base64-encoded image payload.
    pub image_data: String,
    /// MIME type of the source image (e.g., `"image/jpeg"`).
    pub mime_type: String,
    /// The natural-language directive. Always [`INSTRUCTION_TEXT`].
    pub instruction: String,
}

impl TransformRequest {
    /// Build a request from an uploaded source image.
    #[must_use]
    pub fn from_source(source: &SourceImage, model: &str) -> Self {
        Self {
            model: model.to_string(),
            image_data: source.encoded_payload.clone(),
            mime_type: source.mime_type.clone(),
            instruction: INSTRUCTION_TEXT.to_string(),
        }
    }
}

/// A modernized photo returned by the transform service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevivedImage {
    /// Raw image bytes (decoded from base64).
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    /// MIME type the service declared for the bytes.
    pub mime_type: String,
}

/// Boxed future type returned by [`PhotoTransformer::transform`].
///
/// `Ok(None)` means the call succeeded but the service returned no
/// image-bearing part — a recoverable outcome, distinct from a hard error.
pub type TransformFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Option<RevivedImage>, ReviveError>> + Send + 'a>>;

/// Modernizes photos via an external API.
pub trait PhotoTransformer: Send + Sync {
    /// Transform the photo carried by the given request.
    fn transform(&self, request: &TransformRequest) -> TransformFuture<'_>;
}

/// Serde helper for serializing `Vec<u8>` as base64 strings in cassettes.
mod base64_bytes {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize bytes as base64 string.
    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(data);
        serializer.serialize_str(&encoded)
    }

    /// Deserialize base64 string to bytes.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}
