//! CLI configuration at ~/.config/hevhub/config.toml.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

static DEFAULT_API_URL: &str = "https://api.highlandeventshub.co.uk/v1";
static DEFAULT_SITE_URL: &str = "https://highlandeventshub.co.uk";

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_site_url() -> String {
    DEFAULT_SITE_URL.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_site_url")]
    pub site_url: String,
    /// Bearer token from `hevhub auth`. Absent means not signed in.
    pub auth_token: Option<String>,
    /// Organizer attribution applied when a form omits one.
    pub default_organizer: Option<String>,
}

impl Default for HubConfig {
    fn default() -> Self {
        HubConfig {
            api_url: default_api_url(),
            site_url: default_site_url(),
            auth_token: None,
            default_organizer: None,
        }
    }
}

impl HubConfig {
    pub fn event_page_url(&self, slug: &str) -> String {
        format!("{}/events/{}", self.site_url.trim_end_matches('/'), slug)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join("hevhub").join("config.toml"))
}

pub fn load_config() -> Result<HubConfig> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(HubConfig::default());
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("Invalid config at {}", path.display()))
}

pub fn save_config(config: &HubConfig) -> Result<()> {
    let path = config_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))
}
