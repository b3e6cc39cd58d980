use anyhow::Result;
use owo_colors::OwoColorize;

use crate::client::Client;
use crate::config;
use crate::utils::tui;

pub async fn run() -> Result<()> {
    let cfg = config::load_config()?;
    let client = Client::from_config(&cfg)?;

    let spinner = tui::create_spinner("Fetching venues...".to_string());
    let result = client.list_venues().await;
    spinner.finish_and_clear();

    let venues = result?;
    if venues.is_empty() {
        println!("{}", "No venues found".dimmed());
        return Ok(());
    }

    for venue in venues {
        let postcode = venue
            .postcode
            .map(|pc| format!(" ({pc})"))
            .unwrap_or_default();
        println!("{} {}{}", venue.id.dimmed(), venue.name, postcode.dimmed());
    }
    Ok(())
}
