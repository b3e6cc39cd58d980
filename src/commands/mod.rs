pub mod auth;
pub mod categories;
pub mod check;
pub mod delete;
pub mod export;
pub mod preview;
pub mod show;
pub mod stop;
pub mod submit;
pub mod update;
pub mod upload;
pub mod validate;
pub mod venues;

use std::path::Path;

use anyhow::{Context, Result};
use hevhub_core::submission::EventForm;

/// Load an event form from a TOML file.
pub(crate) fn load_form(path: &Path) -> Result<EventForm> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read form file {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("Invalid event form in {}", path.display()))
}
