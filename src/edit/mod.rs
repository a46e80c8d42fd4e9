//! Image editing module.

mod gemini;
mod provider;
mod types;

pub use gemini::{GeminiEditor, GeminiEditorBuilder, GeminiModel};
pub use provider::EditProvider;
pub use types::{EditMetadata, EditRequest, EditResult, EncodedImage, ImageBlob, ImageFormat};
