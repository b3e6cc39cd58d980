use anyhow::Result;
use owo_colors::OwoColorize;

use crate::client::Client;
use crate::config;
use crate::utils::tui;

pub async fn run() -> Result<()> {
    let cfg = config::load_config()?;
    let client = Client::from_config(&cfg)?;

    let spinner = tui::create_spinner("Fetching categories...".to_string());
    let result = client.list_categories().await;
    spinner.finish_and_clear();

    let categories = result?;
    for category in categories {
        println!("{} {}", category.id.dimmed(), category.name);
    }
    Ok(())
}
