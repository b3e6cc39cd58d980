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

pub async fn run(form_path: PathBuf, yes: bool) -> Result<()> {
    let cfg = config::load_config()?;
    let client = Client::from_config(&cfg)?;

    let mut form = load_form(&form_path)?;
    if form.organizer.is_none() {
        form.organizer = cfg.default_organizer.clone();
    }

    let payload = validate_and_build_payload(&form, &RegionRules::default())?;

    println!("{}", payload.render());
    println!();

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Submit this event?")
            .default(true)
            .interact()?;
        if !confirmed {
            println!("{}", "Submission cancelled".dimmed());
            return Ok(());
        }
    }

    let spinner = tui::create_spinner("Submitting event...".to_string());
    let result = client.create_event(&payload).await;
    spinner.finish_and_clear();

    let event = result?;
    println!(
        "{} Event created: {}",
        "\u{2713}".green(),
        event.id.bold()
    );
    println!("   {}", cfg.event_page_url(&event.public_slug()).dimmed());
    Ok(())
}
