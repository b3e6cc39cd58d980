use std::path::PathBuf;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use hevhub_core::media;

use crate::client::Client;
use crate::config;
use crate::utils::tui;

pub async fn run(image: PathBuf, folder: String) -> Result<()> {
    let cfg = config::load_config()?;
    let client = Client::from_config(&cfg)?;

    let mime = media::mime_for_path(&image)
        .with_context(|| format!("Unsupported image type: {}", image.display()))?;

    let metadata = std::fs::metadata(&image)
        .with_context(|| format!("Failed to read {}", image.display()))?;
    media::validate_image(mime, metadata.len())?;

    let bytes = std::fs::read(&image)
        .with_context(|| format!("Failed to read {}", image.display()))?;
    let filename = image
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();

    let spinner = tui::create_spinner("Uploading image...".to_string());
    let result = client.upload_image(bytes, filename, mime, &folder).await;
    spinner.finish_and_clear();

    let uploaded = result?;
    println!("{} Image uploaded", "\u{2713}".green());
    println!("   url: {}", uploaded.url);
    if let Some(thumb) = &uploaded.thumbnail_url {
        println!("   thumbnail: {}", thumb.dimmed());
    }
    if let Some(medium) = &uploaded.medium_url {
        println!("   medium: {}", medium.dimmed());
    }
    println!(
        "{}",
        "Reference the url in your form's [image] block".dimmed()
    );
    Ok(())
}
