//! Terminal rendering for hub types using owo_colors.

use owo_colors::OwoColorize;

use hevhub_core::event::{Event, EventLocation, EventPayload};
use hevhub_core::recurrence;
use hevhub_core::showtimes::utc_to_local;

/// Extension trait for colored terminal rendering.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventPayload {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("{}", self.title.bold()));
        lines.push(format!("   Category: {}", self.category));

        let window = format!(
            "{} \u{2013} {}",
            utc_to_local(self.date_start).format("%a %d %b %Y %H:%M"),
            utc_to_local(self.date_end).format("%a %d %b %Y %H:%M"),
        );
        lines.push(format!("   When: {window}"));

        match &self.location {
            Some(EventLocation::Venue { venue_id }) => {
                lines.push(format!("   Where: venue {venue_id}"));
            }
            Some(EventLocation::Custom {
                location_name,
                postcode,
                ..
            }) => {
                let suffix = postcode
                    .as_deref()
                    .map(|pc| format!(" ({pc})"))
                    .unwrap_or_default();
                lines.push(format!("   Where: {location_name}{suffix}"));
            }
            None => {
                lines.push(format!(
                    "   Where: {} participating venues",
                    self.participating_venues.len()
                ));
            }
        }

        if !self.showtimes.is_empty() {
            lines.push(format!("   Showtimes: {}", self.showtimes.len()));
            for showtime in &self.showtimes {
                let start = utc_to_local(showtime.start_time).format("%a %d %b %H:%M");
                let end = showtime
                    .end_time
                    .map(|e| format!(" \u{2013} {}", utc_to_local(e).format("%H:%M")))
                    .unwrap_or_default();
                lines.push(format!("      {start}{end}").dimmed().to_string());
            }
        }

        if let Some(rule) = &self.recurrence_rule {
            lines.push(format!("   Repeats: {}", describe_rule(rule)));
        }

        if !self.tags.is_empty() {
            lines.push(format!("   Tags: {}", self.tags.join(", ")).dimmed().to_string());
        }

        lines.join("\n")
    }
}

impl Render for Event {
    fn render(&self) -> String {
        format!("{} {}", self.id.dimmed(), self.details.render())
    }
}

/// Human phrasing of a stored rule string; falls back to the raw rule for
/// anything this hub didn't author.
fn describe_rule(rule: &str) -> String {
    use hevhub_core::recurrence::{EndCondition, Frequency};

    match recurrence::from_rule(rule) {
        Some(parsed) => {
            let every = match parsed.frequency {
                Frequency::Weekly => "every week",
                Frequency::Biweekly => "every 2 weeks",
                Frequency::Monthly => "every month",
            };
            match (parsed.end_condition, parsed.end_date) {
                (EndCondition::OnDate, Some(until)) => {
                    format!("{every} until {}", until.format("%d %b %Y"))
                }
                _ => format!("{every} (next 90 days generated)"),
            }
        }
        None => rule.to_string(),
    }
}
