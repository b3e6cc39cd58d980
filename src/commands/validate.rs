use std::path::PathBuf;

use anyhow::Result;
use owo_colors::OwoColorize;

use hevhub_core::region::RegionRules;
use hevhub_core::submission::validate_and_build_payload;

use crate::commands::load_form;
use crate::render::Render;

pub fn run(form_path: PathBuf) -> Result<()> {
    let form = load_form(&form_path)?;
    let payload = validate_and_build_payload(&form, &RegionRules::default())?;

    println!("{}", payload.render());
    println!();
    println!("{} Form is valid and ready to submit", "\u{2713}".green());
    Ok(())
}
