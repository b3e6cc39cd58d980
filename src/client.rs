//! HTTP client for the Highland Events Hub API.
//!
//! One request per operation, no retries: network and server failures are
//! surfaced verbatim for the user to resubmit manually.

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::Deserialize;

use hevhub_core::event::{Event, EventPayload};

use crate::config::HubConfig;

pub struct Client {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

/// Error body shape returned by the API on failures.
#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct VenueInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub postcode: Option<String>,
}

/// Media upload result per the upload endpoint contract.
#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    pub url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub medium_url: Option<String>,
}

impl Client {
    /// Build a client from config. A missing token is a hard precondition
    /// failure, not a form error.
    pub fn from_config(config: &HubConfig) -> Result<Self> {
        let token = config
            .auth_token
            .clone()
            .context("Not signed in. Run `hevhub auth` to store your API token")?;

        Ok(Client {
            http: reqwest::Client::new(),
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// POST /events
    pub async fn create_event(&self, payload: &EventPayload) -> Result<Event> {
        let resp = self
            .http
            .post(format!("{}/events", self.base_url))
            .bearer_auth(&self.token)
            .json(payload)
            .send()
            .await
            .context("Failed to reach the Highland Events Hub API")?;

        Ok(Self::checked(resp).await?.json().await?)
    }

    /// PUT /events/:id
    pub async fn update_event(&self, id: &str, payload: &EventPayload) -> Result<Event> {
        let resp = self
            .http
            .put(format!("{}/events/{}", self.base_url, id))
            .bearer_auth(&self.token)
            .json(payload)
            .send()
            .await
            .context("Failed to reach the Highland Events Hub API")?;

        Ok(Self::checked(resp).await?.json().await?)
    }

    /// GET /events/:id
    pub async fn get_event(&self, id: &str) -> Result<Event> {
        let resp = self
            .http
            .get(format!("{}/events/{}", self.base_url, id))
            .bearer_auth(&self.token)
            .send()
            .await
            .context("Failed to reach the Highland Events Hub API")?;

        Ok(Self::checked(resp).await?.json().await?)
    }

    /// DELETE /events/:id
    pub async fn delete_event(&self, id: &str) -> Result<()> {
        let resp = self
            .http
            .delete(format!("{}/events/{}", self.base_url, id))
            .bearer_auth(&self.token)
            .send()
            .await
            .context("Failed to reach the Highland Events Hub API")?;

        Self::checked(resp).await?;
        Ok(())
    }

    /// POST /events/:id/stop-recurrence — deletes generated instances that
    /// have not yet occurred.
    pub async fn stop_recurrence(&self, id: &str) -> Result<()> {
        let resp = self
            .http
            .post(format!("{}/events/{}/stop-recurrence", self.base_url, id))
            .bearer_auth(&self.token)
            .send()
            .await
            .context("Failed to reach the Highland Events Hub API")?;

        Self::checked(resp).await?;
        Ok(())
    }

    /// GET /categories
    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        let resp = self
            .http
            .get(format!("{}/categories", self.base_url))
            .bearer_auth(&self.token)
            .send()
            .await
            .context("Failed to reach the Highland Events Hub API")?;

        Ok(Self::checked(resp).await?.json().await?)
    }

    /// GET /venues
    pub async fn list_venues(&self) -> Result<Vec<VenueInfo>> {
        let resp = self
            .http
            .get(format!("{}/venues", self.base_url))
            .bearer_auth(&self.token)
            .send()
            .await
            .context("Failed to reach the Highland Events Hub API")?;

        Ok(Self::checked(resp).await?.json().await?)
    }

    /// POST /media — multipart upload with a folder classifier. Callers
    /// must have run `hevhub_core::media::validate_image` first.
    pub async fn upload_image(
        &self,
        bytes: Vec<u8>,
        filename: String,
        mime: &str,
        folder: &str,
    ) -> Result<UploadResponse> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename)
            .mime_str(mime)?;
        let form = reqwest::multipart::Form::new()
            .text("folder", folder.to_string())
            .part("file", part);

        let resp = self
            .http
            .post(format!("{}/media", self.base_url))
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await
            .context("Failed to reach the Highland Events Hub API")?;

        Ok(Self::checked(resp).await?.json().await?)
    }

    /// Map non-success responses to user-facing errors. API error bodies
    /// pass through verbatim; auth failures get dedicated messages since
    /// the user cannot fix them by editing the form.
    async fn checked(resp: reqwest::Response) -> Result<reqwest::Response> {
        let status = resp.status();
        match status {
            s if s.is_success() => Ok(resp),
            StatusCode::UNAUTHORIZED => {
                anyhow::bail!("Your session is no longer valid. Run `hevhub auth` to sign in again")
            }
            StatusCode::FORBIDDEN => {
                anyhow::bail!("You don't have permission to manage this event")
            }
            _ => {
                let message = resp
                    .json::<ErrorResponse>()
                    .await
                    .map(|e| e.error)
                    .unwrap_or_else(|_| format!("API request failed with status {status}"));
                anyhow::bail!("{message}")
            }
        }
    }
}
