//! Core types for the image edit pipeline.

use crate::error::{EditError, Result};
use base64::Engine;
use std::path::Path;

/// Image formats accepted as edit input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    /// PNG format (lossless).
    #[default]
    Png,
    /// JPEG format (lossy).
    Jpeg,
    /// WebP format (modern, efficient).
    WebP,
}

impl ImageFormat {
    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
        }
    }

    /// Attempts to detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "webp" => Some(Self::WebP),
            _ => None,
        }
    }

    /// Detects image format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 12 {
            return None;
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(Self::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        // WebP: RIFF....WEBP
        if data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some(Self::WebP);
        }

        None
    }
}

/// A locally selected image: raw bytes plus their media type.
///
/// Immutable once constructed; superseded by building a new one.
#[derive(Debug, Clone)]
pub struct ImageBlob {
    /// Raw image bytes.
    pub data: Vec<u8>,
    /// MIME-style media type, e.g. `"image/png"`.
    pub media_type: String,
}

impl ImageBlob {
    /// Creates a blob from raw bytes and an explicit media type.
    pub fn new(data: Vec<u8>, media_type: impl Into<String>) -> Self {
        Self {
            data,
            media_type: media_type.into(),
        }
    }

    /// Reads a blob from disk, detecting the media type from magic bytes
    /// with the file extension as fallback.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;

        let media_type = ImageFormat::from_magic_bytes(&data)
            .or_else(|| {
                path.extension()
                    .and_then(|e| e.to_str())
                    .and_then(ImageFormat::from_extension)
            })
            .unwrap_or_default()
            .mime_type()
            .to_string();

        Ok(Self { data, media_type })
    }

    /// Encodes the blob's bytes as standard base64.
    ///
    /// Pure transformation; decoding the result reproduces the bytes exactly.
    pub fn encode(&self) -> EncodedImage {
        EncodedImage {
            payload: base64::engine::general_purpose::STANDARD.encode(&self.data),
        }
    }
}

/// Standard base64 of an image's bytes, without any data-URL header.
///
/// The media type travels separately (see [`EditRequest`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    payload: String,
}

impl EncodedImage {
    /// Wraps an already-encoded base64 payload.
    pub fn from_base64(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// Extracts the raw payload from a data URL, stripping the
    /// `data:<mime>;base64,` header and any embedded whitespace.
    ///
    /// Bare base64 input (no header) is accepted as-is. Fails if the
    /// remaining payload does not decode.
    pub fn from_data_url(input: &str) -> Result<Self> {
        let b64 = match input.find(";base64,") {
            Some(pos) => &input[pos + 8..],
            None => input,
        };

        let payload: String = b64.chars().filter(|c| !c.is_ascii_whitespace()).collect();

        let encoded = Self { payload };
        encoded.decode()?;
        Ok(encoded)
    }

    /// Returns the base64 payload.
    pub fn as_str(&self) -> &str {
        &self.payload
    }

    /// Decodes the payload back to raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>> {
        // Padded first, then the no-pad fallback for payloads missing `=`.
        base64::engine::general_purpose::STANDARD
            .decode(&self.payload)
            .or_else(|_| base64::engine::general_purpose::STANDARD_NO_PAD.decode(&self.payload))
            .map_err(|e| EditError::Decode(e.to_string()))
    }
}

/// A single edit invocation: encoded image, its media type, and the
/// instruction text. Built per call, never persisted.
#[derive(Debug, Clone)]
pub struct EditRequest {
    /// The encoded input image.
    pub image: EncodedImage,
    /// Media type of the input image.
    pub media_type: String,
    /// Free-text instruction describing the edit.
    ///
    /// Emptiness is the caller's concern; an empty instruction is sent
    /// verbatim and its outcome is whatever the model returns.
    pub instruction: String,
}

impl EditRequest {
    /// Creates a request from an already-encoded image.
    pub fn new(
        image: EncodedImage,
        media_type: impl Into<String>,
        instruction: impl Into<String>,
    ) -> Self {
        Self {
            image,
            media_type: media_type.into(),
            instruction: instruction.into(),
        }
    }

    /// Encodes a blob and pairs it with an instruction.
    pub fn from_blob(blob: &ImageBlob, instruction: impl Into<String>) -> Self {
        Self {
            image: blob.encode(),
            media_type: blob.media_type.clone(),
            instruction: instruction.into(),
        }
    }
}

/// Metadata about the edit call.
#[derive(Debug, Clone, Default)]
pub struct EditMetadata {
    /// Model used for the edit.
    pub model: Option<String>,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: Option<u64>,
}

/// The normalized outcome of one edit request.
///
/// At least one of `image` and `text` is populated; a response carrying
/// neither is reported as [`EditError::NoOutput`] instead. When both are
/// present the image takes display priority downstream, but both are
/// returned.
#[derive(Debug, Clone)]
#[must_use = "edit result should be displayed or saved"]
pub struct EditResult {
    /// Directly renderable data URL for the edited image, if any.
    pub image: Option<String>,
    /// Accumulated text returned by the model, if any.
    pub text: Option<String>,
    /// Metadata about the call.
    pub metadata: EditMetadata,
}

impl EditResult {
    /// Decodes the edited image back to raw bytes, if an image was returned.
    pub fn image_bytes(&self) -> Result<Option<Vec<u8>>> {
        match &self.image {
            Some(url) => EncodedImage::from_data_url(url)?.decode().map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 12] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    const JPEG_MAGIC: [u8; 12] = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0, 0, 0, 0, 0];
    const WEBP_MAGIC: [u8; 12] = *b"RIFF\x00\x00\x00\x00WEBP";

    #[test]
    fn test_format_from_magic_bytes() {
        assert_eq!(
            ImageFormat::from_magic_bytes(&PNG_MAGIC),
            Some(ImageFormat::Png)
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(&JPEG_MAGIC),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(&WEBP_MAGIC),
            Some(ImageFormat::WebP)
        );
        assert_eq!(ImageFormat::from_magic_bytes(b"not an image"), None);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ImageFormat::from_extension("png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_extension("JPG"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("webp"), Some(ImageFormat::WebP));
        assert_eq!(ImageFormat::from_extension("gif"), None);
    }

    #[test]
    fn test_encode_round_trips() {
        let blob = ImageBlob::new(PNG_MAGIC.to_vec(), "image/png");
        let encoded = blob.encode();
        assert_eq!(encoded.decode().unwrap(), PNG_MAGIC.to_vec());
    }

    #[test]
    fn test_encode_has_no_line_breaks_or_header() {
        let blob = ImageBlob::new(vec![0u8; 4096], "image/png");
        let encoded = blob.encode();
        assert!(!encoded.as_str().contains('\n'));
        assert!(!encoded.as_str().contains(','));
    }

    #[test]
    fn test_from_data_url_strips_header() {
        let encoded = EncodedImage::from_data_url("data:image/jpeg;base64,aGVsbG8=").unwrap();
        assert_eq!(encoded.as_str(), "aGVsbG8=");
        assert_eq!(encoded.decode().unwrap(), b"hello");
    }

    #[test]
    fn test_from_data_url_accepts_bare_base64() {
        let encoded = EncodedImage::from_data_url("aGVsbG8=").unwrap();
        assert_eq!(encoded.decode().unwrap(), b"hello");
    }

    #[test]
    fn test_from_data_url_strips_whitespace_and_padding_gaps() {
        let encoded = EncodedImage::from_data_url("aGVs\nbG8").unwrap();
        assert_eq!(encoded.decode().unwrap(), b"hello");
    }

    #[test]
    fn test_from_data_url_rejects_garbage() {
        assert!(matches!(
            EncodedImage::from_data_url("data:image/png;base64,!!not-base64!!"),
            Err(EditError::Decode(_))
        ));
    }

    #[test]
    fn test_request_from_blob_carries_media_type() {
        let blob = ImageBlob::new(JPEG_MAGIC.to_vec(), "image/jpeg");
        let request = EditRequest::from_blob(&blob, "Add a vintage filter");
        assert_eq!(request.media_type, "image/jpeg");
        assert_eq!(request.instruction, "Add a vintage filter");
        assert_eq!(request.image.decode().unwrap(), JPEG_MAGIC.to_vec());
    }

    #[test]
    fn test_result_image_bytes() {
        let result = EditResult {
            image: Some("data:image/png;base64,aGVsbG8=".into()),
            text: None,
            metadata: EditMetadata::default(),
        };
        assert_eq!(result.image_bytes().unwrap(), Some(b"hello".to_vec()));

        let result = EditResult {
            image: None,
            text: Some("no image".into()),
            metadata: EditMetadata::default(),
        };
        assert_eq!(result.image_bytes().unwrap(), None);
    }
}
