//! Live adapter for the Gemini image transform API.

use base64::Engine;
use reqwest::Client;
use serde::Deserialize;

use crate::config::CredentialProvider;
use crate::error::ReviveError;
use crate::ports::photo_transformer::{
    PhotoTransformer, RevivedImage, TransformFuture, TransformRequest,
};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Message used when the service fails without a usable message of its own.
pub const UNKNOWN_ERROR_MESSAGE: &str = "unknown error contacting transform service";

/// Live photo transformer that calls the Gemini `generateContent` API.
///
/// Holds no credential: the key is resolved from the provider immediately
/// before each call, so rotation takes effect on the next call.
pub struct GeminiTransformer {
    client: Client,
    credentials: Box<dyn CredentialProvider>,
}

impl GeminiTransformer {
    /// Create a new transformer backed by the given credential provider.
    #[must_use]
    pub fn new(credentials: Box<dyn CredentialProvider>) -> Self {
        Self { client: Client::new(), credentials }
    }
}

impl PhotoTransformer for GeminiTransformer {
    fn transform(&self, request: &TransformRequest) -> TransformFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let api_key = self.credentials.api_key()?;
            let url = format!("{GEMINI_API_BASE}/{}:generateContent", request.model);

            let body = serde_json::json!({
                "contents": [{
                    "parts": [
                        {
                            "inlineData": {
                                "data": request.image_data,
                                "mimeType": request.mime_type,
                            }
                        },
                        {"text": request.instruction}
                    ]
                }],
                "generationConfig": {
                    "responseModalities": ["IMAGE"]
                }
            });

            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &api_key)
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            let response_text = response.text().await?;

            if !status.is_success() {
                let message = if response_text.trim().is_empty() {
                    UNKNOWN_ERROR_MESSAGE.to_string()
                } else {
                    response_text
                };
                return Err(ReviveError::Api { status: status.as_u16(), message });
            }

            let parsed: GeminiResponse = serde_json::from_str(&response_text).map_err(|e| {
                ReviveError::Transform(format!("Failed to parse response: {e}"))
            })?;

            // First inline-data part wins; text parts are skipped.
            for candidate in parsed.candidates {
                for part in candidate.content.parts {
                    if let Some(inline) = part.inline_data {
                        let data = base64::engine::general_purpose::STANDARD
                            .decode(&inline.data)
                            .map_err(|e| {
                                ReviveError::Transform(format!("Failed to decode base64: {e}"))
                            })?;
                        return Ok(Some(RevivedImage { data, mime_type: inline.mime_type }));
                    }
                }
            }

            Ok(None)
        })
    }
}

// --- Gemini API response types ---

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    // Absent when the model returned nothing (e.g., safety-filtered).
    #[serde(default)]
    content: GeminiContent,
}

#[derive(Default, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    #[allow(dead_code)]
    text: Option<String>,
    inline_data: Option<GeminiInlineData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}
