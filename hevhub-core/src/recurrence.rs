//! Recurrence rule translation and local occurrence preview.
//!
//! The hub persists recurrence as an RFC-5545-like rule body (`FREQ=WEEKLY`,
//! optionally `;INTERVAL=2` and `;UNTIL=YYYYMMDD`). `to_rule` builds that
//! string from form input and `from_rule` hydrates it back for edit forms.
//!
//! Weekday selection is accepted on input but NOT encoded in the rule
//! string, so it cannot be recovered by `from_rule`. This asymmetry matches
//! the deployed wire format, which is owned by the event-generation service.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rrule::RRuleSet;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_GENERATION_HORIZON_DAYS, MAX_PREVIEW_OCCURRENCES};
use crate::error::{HubError, HubResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndCondition {
    /// No end date; the generation service applies its default horizon
    /// (90 days) rather than generating indefinitely.
    #[default]
    Never,
    OnDate,
}

/// Recurrence choices as entered on the form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecurrenceInput {
    pub frequency: Frequency,
    #[serde(default)]
    pub end_condition: EndCondition,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Selected weekdays, 0 = Sunday through 6 = Saturday. Accepted but not
    /// persisted in the rule string; see module docs.
    #[serde(default)]
    pub weekdays: Vec<u8>,
}

/// Rule fields recoverable from a stored rule string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedRecurrence {
    pub frequency: Frequency,
    pub end_condition: EndCondition,
    pub end_date: Option<NaiveDate>,
}

/// Build the persisted rule body from form input.
///
/// `Never` omits `UNTIL` entirely; the generation service reads that as its
/// 90-day default horizon. Callers must have validated that `OnDate` comes
/// with an end date (the orchestrator enforces this).
pub fn to_rule(input: &RecurrenceInput) -> String {
    let mut rule = match input.frequency {
        Frequency::Weekly => String::from("FREQ=WEEKLY"),
        Frequency::Biweekly => String::from("FREQ=WEEKLY;INTERVAL=2"),
        Frequency::Monthly => String::from("FREQ=MONTHLY"),
    };

    if input.end_condition == EndCondition::OnDate {
        if let Some(until) = input.end_date {
            rule.push_str(";UNTIL=");
            rule.push_str(&until.format("%Y%m%d").to_string());
        }
    }

    rule
}

/// Hydrate a stored rule body back into form state.
///
/// Returns None for rules this hub never writes (unknown FREQ, other
/// intervals), so callers fall back to treating the event as non-recurring
/// rather than misrepresenting the rule. Weekdays are never recovered.
pub fn from_rule(rule: &str) -> Option<ParsedRecurrence> {
    let mut freq = None;
    let mut interval: u32 = 1;
    let mut until = None;

    for part in rule.split(';') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (key, value) = part.split_once('=')?;
        match key.trim().to_ascii_uppercase().as_str() {
            "FREQ" => freq = Some(value.trim().to_ascii_uppercase()),
            "INTERVAL" => interval = value.trim().parse().ok()?,
            "UNTIL" => until = Some(parse_until(value.trim())?),
            // Ignore parts we don't author (the service may annotate rules)
            _ => {}
        }
    }

    let frequency = match (freq?.as_str(), interval) {
        ("WEEKLY", 1) => Frequency::Weekly,
        ("WEEKLY", 2) => Frequency::Biweekly,
        ("MONTHLY", 1) => Frequency::Monthly,
        _ => return None,
    };

    let end_condition = if until.is_some() {
        EndCondition::OnDate
    } else {
        EndCondition::Never
    };

    Some(ParsedRecurrence {
        frequency,
        end_condition,
        end_date: until,
    })
}

/// UNTIL values appear as bare dates from this hub, or as UTC datetimes
/// when a rule has passed through the generation service.
fn parse_until(value: &str) -> Option<NaiveDate> {
    if value.len() >= 8 {
        NaiveDate::parse_from_str(&value[..8], "%Y%m%d").ok()
    } else {
        None
    }
}

/// Locally expand a recurrence to the instances the generation service
/// will produce, for preview before submission.
///
/// Open-ended series are capped at the service's 90-day horizon so the
/// preview matches generated reality. Start times are organizer-local
/// wall-clock values, expanded as floating times.
pub fn preview_occurrences(
    input: &RecurrenceInput,
    start: NaiveDateTime,
) -> HubResult<Vec<NaiveDateTime>> {
    let until = match (input.end_condition, input.end_date) {
        (EndCondition::OnDate, Some(date)) => date
            .and_hms_opt(23, 59, 59)
            .unwrap_or_else(|| date.and_time(chrono::NaiveTime::MIN)),
        _ => start + Duration::days(DEFAULT_GENERATION_HORIZON_DAYS),
    };

    let base = to_rule(&RecurrenceInput {
        end_date: None,
        end_condition: EndCondition::Never,
        ..input.clone()
    });
    let rrule_str = format!(
        "DTSTART:{}\nRRULE:{};UNTIL={}",
        start.format("%Y%m%dT%H%M%SZ"),
        base,
        until.format("%Y%m%dT%H%M%SZ"),
    );

    let rrule_set: RRuleSet = rrule_str
        .parse()
        .map_err(|e| HubError::RuleParse(format!("Failed to expand recurrence: {e}")))?;

    let result = rrule_set.all(MAX_PREVIEW_OCCURRENCES);
    Ok(result.dates.iter().map(|dt| dt.naive_utc()).collect())
}
