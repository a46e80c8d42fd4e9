//! Gemini image edit provider.

use crate::edit::provider::EditProvider;
use crate::edit::types::{EditMetadata, EditRequest, EditResult};
use crate::error::{sanitize_error_message, EditError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Display prefix for returned image bytes.
///
/// Returned payloads are labeled PNG whatever the wire mimeType says; the
/// actual reported type is logged at debug level.
const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Gemini image model variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GeminiModel {
    /// Nano Banana - Gemini 2.5 Flash Image (fast, economical).
    #[default]
    NanoBanana,
    /// Nano Banana Pro - Gemini 3 Pro Image (highest quality).
    NanoBananaPro,
}

impl GeminiModel {
    /// Returns the API model identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NanoBanana => "gemini-2.5-flash-image",
            Self::NanoBananaPro => "nano-banana-pro-preview",
        }
    }
}

/// Builder for [`GeminiEditor`].
#[derive(Debug, Clone, Default)]
pub struct GeminiEditorBuilder {
    api_key: Option<String>,
    model: GeminiModel,
    base_url: Option<String>,
}

impl GeminiEditorBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key. Falls back to `GOOGLE_API_KEY` env var.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the Gemini model variant.
    pub fn model(mut self, model: GeminiModel) -> Self {
        self.model = model;
        self
    }

    /// Overrides the service endpoint. Intended for tests.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Builds the editor, resolving the API key.
    pub fn build(self) -> Result<GeminiEditor> {
        let api_key = self
            .api_key
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .ok_or_else(|| {
                EditError::Auth("GOOGLE_API_KEY not set and no API key provided".into())
            })?;

        Ok(GeminiEditor {
            client: reqwest::Client::new(),
            api_key,
            model: self.model,
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }
}

/// Gemini image edit provider.
///
/// Issues exactly one `generateContent` call per [`edit`](EditProvider::edit)
/// invocation. No caching, no retries, no timeout beyond the transport's own.
pub struct GeminiEditor {
    client: reqwest::Client,
    api_key: String,
    model: GeminiModel,
    base_url: String,
}

impl GeminiEditor {
    /// Creates a new `GeminiEditorBuilder`.
    pub fn builder() -> GeminiEditorBuilder {
        GeminiEditorBuilder::new()
    }

    async fn edit_impl(&self, request: &EditRequest) -> Result<EditResult> {
        let start = Instant::now();

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url,
            self.model.as_str(),
        );

        let body = GeminiRequest::from_edit_request(request);

        tracing::debug!(
            model = self.model.as_str(),
            media_type = %request.media_type,
            "submitting edit request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(EditError::Api {
                status: status.as_u16(),
                message: sanitize_error_message(&text),
            });
        }

        let gemini_response: GeminiResponse = response.json().await?;

        let mut result = normalize_response(gemini_response)?;
        result.metadata = EditMetadata {
            model: Some(self.model.as_str().to_string()),
            duration_ms: Some(start.elapsed().as_millis() as u64),
        };

        tracing::debug!(
            has_image = result.image.is_some(),
            has_text = result.text.is_some(),
            "edit response normalized"
        );

        Ok(result)
    }
}

#[async_trait]
impl EditProvider for GeminiEditor {
    async fn edit(&self, request: &EditRequest) -> Result<EditResult> {
        self.edit_impl(request).await
    }

    fn name(&self) -> &str {
        "Gemini (Google)"
    }

    async fn health_check(&self) -> Result<()> {
        let url = format!("{}/v1beta/models/{}", self.base_url, self.model.as_str());

        let response = self
            .client
            .get(&url)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await?;

        match response.status().as_u16() {
            401 | 403 => Err(EditError::Auth("Invalid API key".into())),
            s if !(200..300).contains(&s) => Err(EditError::Api {
                status: s,
                message: "Health check failed".into(),
            }),
            _ => Ok(()),
        }
    }
}

/// Folds a response's ordered parts into a single result.
///
/// Scans every part of the first candidate: the last inline-data part wins,
/// text parts accumulate in encounter order with no separator. Empty text
/// fragments do not count as output. A response carrying neither is an
/// error, not an empty success.
fn normalize_response(response: GeminiResponse) -> Result<EditResult> {
    let mut image = None;
    let mut text: Option<String> = None;

    let parts = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts)
        .unwrap_or_default();

    for part in parts {
        if let Some(inline) = part.inline_data {
            tracing::debug!(mime_type = %inline.mime_type, "received inline image part");
            image = Some(format!("{PNG_DATA_URL_PREFIX}{}", inline.data));
        } else if let Some(fragment) = part.text {
            if !fragment.is_empty() {
                text.get_or_insert_with(String::new).push_str(&fragment);
            }
        }
    }

    if image.is_none() && text.is_none() {
        return Err(EditError::NoOutput);
    }

    Ok(EditResult {
        image,
        text,
        metadata: EditMetadata::default(),
    })
}

// Request/Response types
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiRequestPart>,
}

/// A part in a Gemini request - inline image data or text.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum GeminiRequestPart {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: GeminiInlineData,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}

impl GeminiRequest {
    /// Two ordered parts: the inline image first, the instruction second.
    /// No generation config: response schemas are incompatible with
    /// image-generating models.
    fn from_edit_request(request: &EditRequest) -> Self {
        let parts = vec![
            GeminiRequestPart::InlineData {
                inline_data: GeminiInlineData {
                    mime_type: request.media_type.clone(),
                    data: request.image.as_str().to_string(),
                },
            },
            GeminiRequestPart::Text {
                text: request.instruction.clone(),
            },
        ];

        Self {
            contents: vec![GeminiContent { parts }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContentResponse>,
}

#[derive(Debug, Deserialize)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPartResponse {
    #[serde(default)]
    inline_data: Option<GeminiInlineData>,
    #[serde(default)]
    text: Option<String>,
}
