use anyhow::{Context, Result};
use dialoguer::Password;
use owo_colors::OwoColorize;

use crate::config;

pub async fn run() -> Result<()> {
    let mut cfg = config::load_config()?;

    let token: String = Password::new()
        .with_prompt("Paste your Highland Events Hub API token")
        .interact()
        .context("Failed to read token")?;

    let token = token.trim().to_string();
    if token.is_empty() {
        anyhow::bail!("No token entered");
    }

    cfg.auth_token = Some(token);
    config::save_config(&cfg)?;

    println!(
        "{} Signed in. Token stored in {}",
        "\u{2713}".green(),
        config::config_path()?.display()
    );
    Ok(())
}
