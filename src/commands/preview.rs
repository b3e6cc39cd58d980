use std::path::PathBuf;

use anyhow::Result;
use owo_colors::OwoColorize;

use hevhub_core::recurrence::preview_occurrences;

use crate::commands::load_form;

pub fn run(form_path: PathBuf) -> Result<()> {
    let form = load_form(&form_path)?;

    let Some(recurrence) = &form.recurrence else {
        anyhow::bail!("This form has no [recurrence] block; nothing to preview");
    };

    let occurrences = preview_occurrences(recurrence, form.date_start)?;

    println!(
        "{} will generate {} instance(s):",
        form.title.bold(),
        occurrences.len()
    );
    for occurrence in &occurrences {
        println!("   {}", occurrence.format("%a %d %b %Y %H:%M"));
    }
    println!(
        "{}",
        "Open-ended series are generated 90 days ahead".dimmed()
    );
    Ok(())
}
