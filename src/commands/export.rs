use std::path::PathBuf;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use hevhub_core::ics::generate_ics;

use crate::client::Client;
use crate::config;
use crate::utils::tui;

pub async fn run(id: String, output: Option<PathBuf>) -> Result<()> {
    let cfg = config::load_config()?;
    let client = Client::from_config(&cfg)?;

    let spinner = tui::create_spinner("Fetching event...".to_string());
    let result = client.get_event(&id).await;
    spinner.finish_and_clear();
    let event = result?;

    let ics = generate_ics(&event)?;
    let path = output.unwrap_or_else(|| PathBuf::from(format!("{}.ics", event.public_slug())));

    std::fs::write(&path, ics).with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "{} Exported '{}' to {}",
        "\u{2713}".green(),
        event.details.title,
        path.display().bold()
    );
    Ok(())
}
