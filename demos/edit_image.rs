//! Image editing demo - applies a text instruction to an existing image.
//!
//! Run with: `cargo run --example edit_image -- <input_image.png>`
//!
//! Requires `GOOGLE_API_KEY` environment variable.

use nanoedit::{EditProvider, EditRequest, GeminiEditor, ImageBlob};

#[tokio::main]
async fn main() -> nanoedit::Result<()> {
    let input_path = std::env::args()
        .nth(1)
        .expect("Usage: edit_image <input_image.png>");

    let blob = ImageBlob::from_path(&input_path).await?;

    let editor = GeminiEditor::builder().build()?;

    let request = EditRequest::from_blob(
        &blob,
        "Make the colors more vibrant and add a warm sunset glow",
    );

    let result = editor.edit(&request).await?;

    match result.image_bytes()? {
        Some(bytes) => {
            std::fs::write("edited.png", &bytes)?;
            println!("Edited image saved to edited.png ({} bytes)", bytes.len());
        }
        None => {
            println!("{}", result.text.unwrap_or_default());
        }
    }

    Ok(())
}
