use std::path::PathBuf;

use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use hevhub_core::region::RegionRules;
use hevhub_core::submission::validate_and_build_payload;

use crate::client::Client;
use crate::commands::load_form;
use crate::config;
use crate::render::Render;
use crate::utils::tui;

pub async fn run(id: String, form_path: PathBuf, yes: bool) -> Result<()> {
    let cfg = config::load_config()?;
    let client = Client::from_config(&cfg)?;

    let mut form = load_form(&form_path)?;
    if form.organizer.is_none() {
        form.organizer = cfg.default_organizer.clone();
    }

    let payload = validate_and_build_payload(&form, &RegionRules::default())?;

    let spinner = tui::create_spinner("Fetching event...".to_string());
    let existing = client.get_event(&id).await;
    spinner.finish_and_clear();
    let existing = existing?;

    // Turning recurrence off deletes generated instances that have not yet
    // occurred, so it needs its own confirmation before anything is sent.
    let stopping_recurrence =
        existing.details.recurrence_rule.is_some() && payload.recurrence_rule.is_none();
    if stopping_recurrence && !yes {
        println!(
            "{} '{}' is a recurring event. Updating it from this form will stop the series",
            "!".yellow().bold(),
            existing.details.title
        );
        let confirmed = Confirm::new()
            .with_prompt("Stop the series and delete instances that have not yet occurred?")
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "Update cancelled".dimmed());
            return Ok(());
        }
    }

    println!("{}", payload.render());
    println!();

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Update this event?")
            .default(true)
            .interact()?;
        if !confirmed {
            println!("{}", "Update cancelled".dimmed());
            return Ok(());
        }
    }

    let spinner = tui::create_spinner("Updating event...".to_string());
    let result = async {
        if stopping_recurrence {
            client.stop_recurrence(&id).await?;
        }
        client.update_event(&id, &payload).await
    }
    .await;
    spinner.finish_and_clear();

    let event = result?;
    println!("{} Event updated: {}", "\u{2713}".green(), event.id.bold());
    println!("   {}", cfg.event_page_url(&event.public_slug()).dimmed());
    Ok(())
}
