//! Wire types for the Event API.
//!
//! `EventPayload` is what the hub accepts on create/update; `Event` is what
//! it returns. Datetimes cross the wire as UTC (RFC 3339); organizer-local
//! wall-clock times exist only on the form side (see `showtimes`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The full create/update payload sent to the Event API in a single call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,

    /// Primary location. Absent for multi-venue events, which carry their
    /// venues in `participating_venues` instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<EventLocation>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub participating_venues: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_display_override: Option<MapPin>,

    /// Canonical event window, always derived (never independently authored
    /// when showtimes exist).
    pub date_start: DateTime<Utc>,
    pub date_end: DateTime<Utc>,

    /// RFC-5545-like rule body (`FREQ=...`), or None for one-off events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_rule: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub showtimes: Vec<ShowtimePayload>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_restriction: Option<AgeRestriction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
}

/// Primary event location: a referenced venue or an ad hoc place.
/// Exactly one of the two forms, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventLocation {
    Venue {
        venue_id: String,
    },
    Custom {
        location_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        latitude: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        longitude: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        postcode: Option<String>,
    },
}

/// Organizer-chosen representative map point for geographically scattered
/// multi-venue events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPin {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
}

/// A single showtime as stored/sent on the wire (UTC).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowtimePayload {
    pub start_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Uploaded image reference as returned by the media endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub medium_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeRestriction {
    #[serde(rename = "all_ages")]
    AllAges,
    #[serde(rename = "14_plus")]
    FourteenPlus,
    #[serde(rename = "18_plus")]
    EighteenPlus,
}

/// A stored event as returned by the Event API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    #[serde(default)]
    pub slug: Option<String>,
    /// Resolved display name when the primary location is a venue reference.
    #[serde(default)]
    pub venue_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub details: EventPayload,
}

impl Event {
    /// Public-URL slug: the server's slug when present, otherwise derived
    /// from the title.
    pub fn public_slug(&self) -> String {
        self.slug
            .clone()
            .unwrap_or_else(|| slug::slugify(&self.details.title))
    }

    /// Human-readable location line for display and calendar export.
    pub fn location_label(&self) -> Option<String> {
        match &self.details.location {
            Some(EventLocation::Custom { location_name, .. }) => Some(location_name.clone()),
            Some(EventLocation::Venue { .. }) => self.venue_name.clone(),
            None => self
                .details
                .map_display_override
                .as_ref()
                .map(|pin| pin.label.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn payload() -> EventPayload {
        EventPayload {
            title: "Ceilidh Night".to_string(),
            description: None,
            category: "music".to_string(),
            location: Some(EventLocation::Venue {
                venue_id: "ven_42".to_string(),
            }),
            participating_venues: Vec::new(),
            map_display_override: None,
            date_start: Utc.with_ymd_and_hms(2026, 9, 4, 18, 0, 0).unwrap(),
            date_end: Utc.with_ymd_and_hms(2026, 9, 4, 22, 0, 0).unwrap(),
            recurrence_rule: None,
            showtimes: Vec::new(),
            tags: Vec::new(),
            image: None,
            ticket_url: None,
            website_url: None,
            age_restriction: None,
            organizer: None,
        }
    }

    #[test]
    fn optional_fields_are_omitted_from_json() {
        let json = serde_json::to_string(&payload()).unwrap();
        assert!(json.contains("\"venue_id\":\"ven_42\""));
        assert!(!json.contains("recurrence_rule"));
        assert!(!json.contains("participating_venues"));
        assert!(!json.contains("ticket_url"));
    }

    #[test]
    fn location_deserializes_by_shape() {
        let venue: EventLocation = serde_json::from_str(r#"{"venue_id":"ven_1"}"#).unwrap();
        assert_eq!(
            venue,
            EventLocation::Venue {
                venue_id: "ven_1".to_string()
            }
        );

        let custom: EventLocation =
            serde_json::from_str(r#"{"location_name":"Glen Affric car park","postcode":"IV4 7ND"}"#)
                .unwrap();
        match custom {
            EventLocation::Custom {
                location_name,
                postcode,
                ..
            } => {
                assert_eq!(location_name, "Glen Affric car park");
                assert_eq!(postcode.as_deref(), Some("IV4 7ND"));
            }
            other => panic!("expected custom location, got {other:?}"),
        }
    }

    #[test]
    fn public_slug_falls_back_to_title() {
        let event = Event {
            id: "evt_1".to_string(),
            slug: None,
            venue_name: None,
            created_at: None,
            updated_at: None,
            details: payload(),
        };
        assert_eq!(event.public_slug(), "ceilidh-night");
    }
}
