#![warn(missing_docs)]
//! nanoedit - single-shot generative image editing.
//!
//! Hand the crate an image and a free-text instruction; get back the edited
//! image as a directly renderable data URL, the model's text explanation
//! when it declines to produce one, or both.
//!
//! # Quick Start
//!
//! ```no_run
//! use nanoedit::{EditProvider, EditRequest, GeminiEditor, ImageBlob};
//!
//! #[tokio::main]
//! async fn main() -> nanoedit::Result<()> {
//!     let blob = ImageBlob::from_path("photo.jpg").await?;
//!     let editor = GeminiEditor::builder().build()?;
//!
//!     let request = EditRequest::from_blob(&blob, "Add a vintage filter");
//!     let result = editor.edit(&request).await?;
//!
//!     if let Some(bytes) = result.image_bytes()? {
//!         std::fs::write("edited.png", bytes)?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Each edit is a single stateless request: no conversation history, no
//! retries, no caching. Failures surface as [`EditError`] with the
//! underlying cause preserved.

mod error;

pub mod edit;

// Re-export error types at crate root
pub use error::{EditError, Result};

// Re-export commonly used edit types
pub use edit::{
    EditMetadata, EditProvider, EditRequest, EditResult, EncodedImage, GeminiEditor,
    GeminiEditorBuilder, GeminiModel, ImageBlob, ImageFormat,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::edit::{
        EditProvider, EditRequest, EditResult, EncodedImage, GeminiEditor, ImageBlob,
    };
    pub use crate::error::{EditError, Result};
}
