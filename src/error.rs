//! Error types for image editing.

/// Errors that can occur while encoding an image or requesting an edit.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    /// Local image bytes could not be read.
    #[error("failed to read image: {0}")]
    Read(#[from] std::io::Error),

    /// API key missing or invalid.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Response body, sanitized for display.
        message: String,
    },

    /// Failed to decode base64 data.
    #[error("failed to decode: {0}")]
    Decode(String),

    /// The model returned neither an edited image nor text.
    #[error("no image or text returned from the model")]
    NoOutput,
}

/// Result type alias for image edit operations.
pub type Result<T> = std::result::Result<T, EditError>;

/// Trims an API error body down to something fit for an error message.
pub(crate) fn sanitize_error_message(text: &str) -> String {
    const MAX_LEN: usize = 600;

    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_control() || *c == '\n')
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        return "(empty response body)".to_string();
    }
    if cleaned.len() <= MAX_LEN {
        return cleaned.to_string();
    }

    let mut end = MAX_LEN;
    while !cleaned.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &cleaned[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EditError::Api {
            status: 429,
            message: "Quota exceeded".into(),
        };
        assert_eq!(err.to_string(), "API error: 429 - Quota exceeded");

        let err = EditError::NoOutput;
        assert_eq!(err.to_string(), "no image or text returned from the model");

        let err = EditError::Auth("GOOGLE_API_KEY not set".into());
        assert_eq!(
            err.to_string(),
            "authentication failed: GOOGLE_API_KEY not set"
        );
    }

    #[test]
    fn test_sanitize_strips_control_chars() {
        assert_eq!(sanitize_error_message("bad\r\x00request"), "badrequest");
    }

    #[test]
    fn test_sanitize_empty_body() {
        assert_eq!(sanitize_error_message("  \t "), "(empty response body)");
    }

    #[test]
    fn test_sanitize_truncates_long_body() {
        let long = "x".repeat(2000);
        let out = sanitize_error_message(&long);
        assert!(out.len() < 700);
        assert!(out.ends_with("..."));
    }
}
