//! CLI for nanoedit - edit an image with a text instruction.

use clap::Parser;
use nanoedit::{EditProvider, EditRequest, GeminiEditor, GeminiModel, ImageBlob};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nanoedit")]
#[command(about = "Edit an image with a text instruction via the Gemini image API")]
#[command(version)]
struct Cli {
    /// Path to the input image (png, jpeg, or webp)
    input: PathBuf,

    /// The instruction describing the edit
    instruction: String,

    /// Output file path for the edited image
    #[arg(short, long, default_value = "edited.png")]
    output: PathBuf,

    /// Use the pro model variant (higher quality, slower)
    #[arg(long)]
    pro: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.instruction.trim().is_empty() {
        anyhow::bail!("instruction must not be empty");
    }

    let blob = ImageBlob::from_path(&cli.input).await?;

    let model = if cli.pro {
        GeminiModel::NanoBananaPro
    } else {
        GeminiModel::NanoBanana
    };
    let editor = GeminiEditor::builder().model(model).build()?;

    let request = EditRequest::from_blob(&blob, &cli.instruction);
    let result = editor.edit(&request).await?;

    let saved = match result.image_bytes()? {
        Some(bytes) => {
            std::fs::write(&cli.output, &bytes)?;
            Some(bytes.len())
        }
        None => None,
    };

    if cli.json {
        let out = serde_json::json!({
            "success": true,
            "output": saved.map(|_| cli.output.display().to_string()),
            "size_bytes": saved,
            "text": result.text,
            "model": result.metadata.model,
            "duration_ms": result.metadata.duration_ms,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        if let Some(size) = saved {
            println!("Edited image: {} ({} bytes)", cli.output.display(), size);
        }
        if let Some(text) = &result.text {
            println!("{text}");
        }
        if let Some(duration) = result.metadata.duration_ms {
            println!("Duration: {}ms", duration);
        }
    }

    Ok(())
}
