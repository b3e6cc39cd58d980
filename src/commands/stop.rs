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

    if event.details.recurrence_rule.is_none() {
        anyhow::bail!("'{}' is not a recurring event", event.details.title);
    }

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Stop the series for '{}' and delete instances that have not yet occurred?",
                event.details.title
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "Cancelled".dimmed());
            return Ok(());
        }
    }

    let spinner = tui::create_spinner("Stopping recurrence...".to_string());
    let result = client.stop_recurrence(&id).await;
    spinner.finish_and_clear();
    result?;

    println!("{} Recurrence stopped", "\u{2713}".green());
    Ok(())
}
