use anyhow::Result;
use owo_colors::OwoColorize;

use crate::client::Client;
use crate::config;
use crate::render::Render;
use crate::utils::tui;

pub async fn run(id: String, open_page: bool) -> Result<()> {
    let cfg = config::load_config()?;
    let client = Client::from_config(&cfg)?;

    let spinner = tui::create_spinner("Fetching event...".to_string());
    let result = client.get_event(&id).await;
    spinner.finish_and_clear();

    let event = result?;
    println!("{}", event.render());

    let page = cfg.event_page_url(&event.public_slug());
    println!("   {}", page.dimmed());

    if open_page {
        open::that(&page)?;
    }
    Ok(())
}
