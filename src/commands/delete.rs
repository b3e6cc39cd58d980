use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use crate::client::Client;
use crate::config;
use crate::utils::tui;

pub async fn run(id: String, yes: bool) -> Result<()> {
    let cfg = config::load_config()?;
    let client = Client::from_config(&cfg)?;

    let spinner = tui::create_spinner("Fetching event...".to_string());
    let result = client.get_event(&id).await;
    spinner.finish_and_clear();
    let event = result?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete '{}'? This cannot be undone",
                event.details.title
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "Deletion cancelled".dimmed());
            return Ok(());
        }
    }

    let spinner = tui::create_spinner("Deleting event...".to_string());
    let result = client.delete_event(&id).await;
    spinner.finish_and_clear();
    result?;

    println!("{} Event deleted", "\u{2713}".green());
    Ok(())
}
