//! ICS calendar export for stored events.
//!
//! Multi-session events export one VEVENT per showtime; everything else
//! exports a single VEVENT spanning the canonical window. Times are
//! written as UTC per RFC 5545.

use chrono::{DateTime, Utc};
use icalendar::{Calendar, Component, EventLike};

use crate::error::{HubError, HubResult};
use crate::event::Event;

/// Generate .ics content for a stored event.
pub fn generate_ics(event: &Event) -> HubResult<String> {
    if event.id.is_empty() {
        return Err(HubError::IcsGenerate(
            "event has no id to build a UID from".to_string(),
        ));
    }

    let mut cal = Calendar::new();
    cal.name("Highland Events Hub");

    if event.details.showtimes.is_empty() {
        cal.push(build_vevent(
            event,
            &format!("{}@highlandeventshub", event.id),
            event.details.date_start,
            Some(event.details.date_end),
            event.details.ticket_url.as_deref(),
        ));
    } else {
        for (index, showtime) in event.details.showtimes.iter().enumerate() {
            cal.push(build_vevent(
                event,
                &format!("{}-{}@highlandeventshub", event.id, index + 1),
                showtime.start_time,
                showtime.end_time,
                showtime
                    .ticket_url
                    .as_deref()
                    .or(event.details.ticket_url.as_deref()),
            ));
        }
    }

    Ok(cal.to_string())
}

fn build_vevent(
    event: &Event,
    uid: &str,
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
    url: Option<&str>,
) -> icalendar::Event {
    let mut vevent = icalendar::Event::new();
    vevent.uid(uid);
    vevent.summary(&event.details.title);

    // DTSTAMP is required by RFC 5545; prefer the stored update time so
    // repeated exports of an unchanged event are identical
    let dtstamp = event
        .updated_at
        .or(event.created_at)
        .unwrap_or_else(Utc::now)
        .format("%Y%m%dT%H%M%SZ")
        .to_string();
    vevent.add_property("DTSTAMP", &dtstamp);

    vevent.add_property("DTSTART", &start.format("%Y%m%dT%H%M%SZ").to_string());
    if let Some(end) = end {
        vevent.add_property("DTEND", &end.format("%Y%m%dT%H%M%SZ").to_string());
    }

    if let Some(description) = &event.details.description {
        vevent.description(description);
    }
    if let Some(location) = event.location_label() {
        vevent.location(&location);
    }
    if let Some(url) = url {
        vevent.add_property("URL", url);
    }
    if let Some(rule) = &event.details.recurrence_rule {
        vevent.add_property("RRULE", &ics_rule(rule));
    }

    vevent
}

/// Stored rules carry UNTIL as a bare date, but RFC 5545 requires UNTIL's
/// value type to match DTSTART, written here as a UTC date-time. Widen a
/// bare-date UNTIL to the end of that day; leave everything else alone.
fn ics_rule(rule: &str) -> String {
    rule.split(';')
        .map(|part| match part.split_once('=') {
            Some(("UNTIL", value))
                if value.len() == 8 && value.chars().all(|c| c.is_ascii_digit()) =>
            {
                format!("UNTIL={value}T235959Z")
            }
            _ => part.to_string(),
        })
        .collect::<Vec<_>>()
        .join(";")
}
