//! Submission orchestration: one canonical validation path for every
//! submit/edit surface.
//!
//! `validate_and_build_payload` runs a linear gate sequence over an
//! immutable form snapshot and either returns the first violated rule or a
//! fully-populated payload. It never performs I/O; the caller owns the
//! single Event API call and must not retry on network failure.

use chrono::{Duration, NaiveDateTime};
use serde::Deserialize;
use url::Url;

use crate::constants::{MAX_SHOWTIME_NOTES_LEN, OPEN_ENDED_DURATION_HOURS};
use crate::error::ValidationError;
use crate::event::{
    AgeRestriction, EventLocation, EventPayload, ImageRef, MapPin, ShowtimePayload,
};
use crate::recurrence::{self, EndCondition, RecurrenceInput};
use crate::region::RegionRules;
use crate::showtimes::{self, EventWindow, Showtime};

/// How the organizer located the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationMode {
    /// An existing venue, referenced by id.
    #[default]
    Venue,
    /// An ad hoc place with a name and postcode or coordinates.
    Custom,
    /// A festival/crawl spread across participating venues.
    MultiVenue,
}

/// Immutable snapshot of the organizer's form input.
///
/// All datetimes are organizer-local wall-clock values; the orchestrator
/// converts to UTC only when building the payload. Deserializes from the
/// TOML form files the CLI accepts (datetimes as quoted
/// `YYYY-MM-DDTHH:MM:SS` strings).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventForm {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub location_mode: LocationMode,
    #[serde(default)]
    pub venue_id: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub participating_venues: Vec<String>,
    #[serde(default)]
    pub map_display_override: Option<MapPin>,

    pub date_start: NaiveDateTime,
    #[serde(default)]
    pub date_end: Option<NaiveDateTime>,
    /// "No specific end time": synthesize a 4-hour window.
    #[serde(default)]
    pub no_end_time: bool,

    /// Multi-session mode: the window is derived from `showtimes`.
    #[serde(default)]
    pub multi_session: bool,
    #[serde(default)]
    pub showtimes: Vec<Showtime>,

    /// Present when the event recurs; absent resets it to one-off. Callers
    /// editing a stored recurring event must confirm before submitting a
    /// form without this block, since that deletes future instances.
    #[serde(default)]
    pub recurrence: Option<RecurrenceInput>,

    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image: Option<ImageRef>,
    #[serde(default)]
    pub ticket_url: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub age_restriction: Option<AgeRestriction>,
    #[serde(default)]
    pub organizer: Option<String>,
}

/// Validate a form and assemble the all-or-nothing Event API payload.
///
/// Gates run in order and short-circuit on the first failure: a title,
/// then
/// 1. location mode requirements (including the region gate for custom
///    locations: postcode when present, coordinate fallback otherwise)
/// 2. category
/// 3. date ordering (single-session), or
/// 4. showtime validation + window aggregation (multi-session)
/// 5. recurrence end-condition requirements
///
/// Building is deterministic: the same form yields a byte-identical
/// payload.
pub fn validate_and_build_payload(
    form: &EventForm,
    rules: &RegionRules,
) -> Result<EventPayload, ValidationError> {
    let title =
        non_empty(Some(form.title.as_str())).ok_or(ValidationError::TitleRequired)?;

    let location = validate_location(form, rules)?;

    let category = non_empty(form.category.as_deref()).ok_or(ValidationError::CategoryRequired)?;

    let (window, showtime_payloads) = validate_window(form)?;

    let recurrence_rule = validate_recurrence(form, &window)?;

    for candidate in [form.ticket_url.as_deref(), form.website_url.as_deref()] {
        if let Some(raw) = non_empty(candidate) {
            Url::parse(&raw).map_err(|_| ValidationError::InvalidUrl(raw.clone()))?;
        }
    }

    Ok(EventPayload {
        title,
        description: non_empty(form.description.as_deref()),
        category,
        location,
        participating_venues: form.participating_venues.clone(),
        map_display_override: form.map_display_override.clone(),
        date_start: showtimes::local_to_utc(window.date_start),
        date_end: showtimes::local_to_utc(window.date_end),
        recurrence_rule,
        showtimes: showtime_payloads,
        tags: form.tags.clone(),
        image: form.image.clone(),
        ticket_url: non_empty(form.ticket_url.as_deref()),
        website_url: non_empty(form.website_url.as_deref()),
        age_restriction: form.age_restriction,
        organizer: non_empty(form.organizer.as_deref()),
    })
}

/// Gate 1: location mode requirements and the geofence.
fn validate_location(
    form: &EventForm,
    rules: &RegionRules,
) -> Result<Option<EventLocation>, ValidationError> {
    match form.location_mode {
        LocationMode::Venue => {
            let venue_id =
                non_empty(form.venue_id.as_deref()).ok_or(ValidationError::VenueRequired)?;
            Ok(Some(EventLocation::Venue { venue_id }))
        }
        LocationMode::Custom => {
            let location_name = non_empty(form.location_name.as_deref())
                .ok_or(ValidationError::LocationNameRequired)?;

            // Postcode wins when present; coordinates are the fallback.
            // No postcode and no coordinates fails closed.
            let in_region = match non_empty(form.postcode.as_deref()) {
                Some(postcode) => rules.is_in_region(&postcode),
                None => match (form.latitude, form.longitude) {
                    (Some(lat), Some(lng)) => rules.is_point_in_region(lat, lng),
                    _ => false,
                },
            };
            if !in_region {
                return Err(ValidationError::OutsideRegion);
            }

            Ok(Some(EventLocation::Custom {
                location_name,
                latitude: form.latitude,
                longitude: form.longitude,
                postcode: non_empty(form.postcode.as_deref()),
            }))
        }
        LocationMode::MultiVenue => {
            if form.participating_venues.is_empty() {
                return Err(ValidationError::ParticipatingVenueRequired);
            }
            Ok(None)
        }
    }
}

/// Gates 3/4: the canonical window. Single-session events take the
/// user-entered window (with the 4-hour synthesis when open-ended);
/// multi-session events derive it from their showtimes.
fn validate_window(
    form: &EventForm,
) -> Result<(EventWindow, Vec<ShowtimePayload>), ValidationError> {
    if form.multi_session {
        for (index, showtime) in form.showtimes.iter().enumerate() {
            if let Some(end) = showtime.end_time {
                if end < showtime.start_time {
                    return Err(ValidationError::ShowtimeEndsBeforeStart(index + 1));
                }
            }
            if let Some(notes) = &showtime.notes {
                if notes.chars().count() > MAX_SHOWTIME_NOTES_LEN {
                    return Err(ValidationError::ShowtimeNotesTooLong(index + 1));
                }
            }
            if let Some(raw) = non_empty(showtime.ticket_url.as_deref()) {
                Url::parse(&raw).map_err(|_| ValidationError::InvalidUrl(raw.clone()))?;
            }
        }

        let window = showtimes::aggregate(&form.showtimes)?;
        let payloads = form.showtimes.iter().map(Showtime::to_payload).collect();
        return Ok((window, payloads));
    }

    let date_end = if form.no_end_time {
        form.date_start + Duration::hours(OPEN_ENDED_DURATION_HOURS)
    } else {
        let end = form.date_end.ok_or(ValidationError::EndBeforeStart)?;
        if end <= form.date_start {
            return Err(ValidationError::EndBeforeStart);
        }
        end
    };

    Ok((
        EventWindow {
            date_start: form.date_start,
            date_end,
        },
        Vec::new(),
    ))
}

/// Gate 5: recurrence end-condition requirements, then rule translation.
fn validate_recurrence(
    form: &EventForm,
    window: &EventWindow,
) -> Result<Option<String>, ValidationError> {
    let Some(input) = &form.recurrence else {
        return Ok(None);
    };

    if input.end_condition == EndCondition::OnDate {
        let end_date = input
            .end_date
            .ok_or(ValidationError::RecurrenceEndDateRequired)?;
        if end_date <= window.date_start.date() {
            return Err(ValidationError::RecurrenceEndBeforeStart);
        }
    }

    Ok(Some(recurrence::to_rule(input)))
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recurrence::Frequency;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 6, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn base_form() -> EventForm {
        EventForm {
            title: "Loch Ness Folk Night".to_string(),
            description: Some("An evening of traditional music".to_string()),
            category: Some("music".to_string()),
            location_mode: LocationMode::Venue,
            venue_id: Some("ven_12".to_string()),
            location_name: None,
            latitude: None,
            longitude: None,
            postcode: None,
            participating_venues: Vec::new(),
            map_display_override: None,
            date_start: at(12, 19),
            date_end: Some(at(12, 23)),
            no_end_time: false,
            multi_session: false,
            showtimes: Vec::new(),
            recurrence: None,
            tags: vec!["folk".to_string()],
            image: None,
            ticket_url: None,
            website_url: None,
            age_restriction: None,
            organizer: Some("Highland Folk Club".to_string()),
        }
    }

    fn rules() -> RegionRules {
        RegionRules::default()
    }

    #[test]
    fn valid_venue_form_builds_payload() {
        let payload = validate_and_build_payload(&base_form(), &rules()).unwrap();
        assert_eq!(payload.title, "Loch Ness Folk Night");
        assert_eq!(
            payload.location,
            Some(EventLocation::Venue {
                venue_id: "ven_12".to_string()
            })
        );
        // 19:00 BST on the form is 18:00 UTC on the wire
        assert_eq!(
            payload.date_start,
            Utc.with_ymd_and_hms(2026, 6, 12, 18, 0, 0).unwrap()
        );
        assert_eq!(
            payload.date_end,
            Utc.with_ymd_and_hms(2026, 6, 12, 22, 0, 0).unwrap()
        );
    }

    #[test]
    fn payload_building_is_idempotent() {
        let form = base_form();
        let first = serde_json::to_vec(&validate_and_build_payload(&form, &rules()).unwrap())
            .unwrap();
        let second = serde_json::to_vec(&validate_and_build_payload(&form, &rules()).unwrap())
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn blank_titles_are_rejected_before_anything_else() {
        let mut form = base_form();
        form.title = String::new();
        assert_eq!(
            validate_and_build_payload(&form, &rules()),
            Err(ValidationError::TitleRequired)
        );

        // Whitespace-only is just as blank, even when later gates would
        // also fail
        form.title = "   ".to_string();
        form.venue_id = None;
        assert_eq!(
            validate_and_build_payload(&form, &rules()),
            Err(ValidationError::TitleRequired)
        );
    }

    #[test]
    fn venue_mode_requires_a_venue() {
        let mut form = base_form();
        form.venue_id = None;
        assert_eq!(
            validate_and_build_payload(&form, &rules()),
            Err(ValidationError::VenueRequired)
        );

        form.venue_id = Some("   ".to_string());
        assert_eq!(
            validate_and_build_payload(&form, &rules()),
            Err(ValidationError::VenueRequired)
        );
    }

    #[test]
    fn custom_location_with_highland_postcode_passes_the_geofence() {
        let mut form = base_form();
        form.location_mode = LocationMode::Custom;
        form.venue_id = None;
        form.location_name = Some("Ness Islands".to_string());
        form.postcode = Some("IV2 4SB".to_string());
        let payload = validate_and_build_payload(&form, &rules()).unwrap();
        match payload.location {
            Some(EventLocation::Custom { postcode, .. }) => {
                assert_eq!(postcode.as_deref(), Some("IV2 4SB"));
            }
            other => panic!("expected custom location, got {other:?}"),
        }
    }

    #[test]
    fn custom_location_outside_the_region_is_rejected() {
        let mut form = base_form();
        form.location_mode = LocationMode::Custom;
        form.location_name = Some("Princes Street Gardens".to_string());
        form.postcode = Some("EH2 2HG".to_string());
        assert_eq!(
            validate_and_build_payload(&form, &rules()),
            Err(ValidationError::OutsideRegion)
        );
    }

    #[test]
    fn custom_location_without_postcode_falls_back_to_coordinates() {
        let mut form = base_form();
        form.location_mode = LocationMode::Custom;
        form.location_name = Some("Glenfinnan Viaduct viewpoint".to_string());
        form.latitude = Some(56.87);
        form.longitude = Some(-5.43);
        assert!(validate_and_build_payload(&form, &rules()).is_ok());

        // No postcode and no coordinates fails closed
        form.latitude = None;
        form.longitude = None;
        assert_eq!(
            validate_and_build_payload(&form, &rules()),
            Err(ValidationError::OutsideRegion)
        );
    }

    #[test]
    fn multi_venue_mode_requires_participants() {
        let mut form = base_form();
        form.location_mode = LocationMode::MultiVenue;
        assert_eq!(
            validate_and_build_payload(&form, &rules()),
            Err(ValidationError::ParticipatingVenueRequired)
        );

        form.participating_venues = vec!["ven_1".to_string(), "ven_2".to_string()];
        let payload = validate_and_build_payload(&form, &rules()).unwrap();
        assert_eq!(payload.location, None);
        assert_eq!(payload.participating_venues.len(), 2);
    }

    #[test]
    fn category_is_required() {
        let mut form = base_form();
        form.category = None;
        assert_eq!(
            validate_and_build_payload(&form, &rules()),
            Err(ValidationError::CategoryRequired)
        );
    }

    #[test]
    fn end_must_follow_start_unless_open_ended() {
        let mut form = base_form();
        form.date_end = Some(form.date_start);
        let err = validate_and_build_payload(&form, &rules()).unwrap_err();
        assert_eq!(err, ValidationError::EndBeforeStart);
        assert_eq!(err.to_string(), "End date must be after start date");

        form.no_end_time = true;
        let payload = validate_and_build_payload(&form, &rules()).unwrap();
        // Synthesized window: start + 4 hours
        assert_eq!(
            payload.date_end - payload.date_start,
            Duration::hours(OPEN_ENDED_DURATION_HOURS)
        );
    }

    #[test]
    fn multi_session_window_comes_from_showtimes() {
        let mut form = base_form();
        form.multi_session = true;
        form.showtimes = vec![
            Showtime {
                start_time: at(12, 14),
                end_time: Some(at(12, 16)),
                ticket_url: None,
                notes: None,
            },
            Showtime {
                start_time: at(12, 19),
                end_time: Some(at(12, 21)),
                ticket_url: None,
                notes: None,
            },
        ];
        let payload = validate_and_build_payload(&form, &rules()).unwrap();
        assert_eq!(
            payload.date_start,
            Utc.with_ymd_and_hms(2026, 6, 12, 13, 0, 0).unwrap()
        );
        assert_eq!(
            payload.date_end,
            Utc.with_ymd_and_hms(2026, 6, 12, 20, 0, 0).unwrap()
        );
        assert_eq!(payload.showtimes.len(), 2);
    }

    #[test]
    fn multi_session_with_no_showtimes_is_rejected() {
        let mut form = base_form();
        form.multi_session = true;
        let err = validate_and_build_payload(&form, &rules()).unwrap_err();
        assert_eq!(err, ValidationError::NoShowtimes);
        assert_eq!(err.to_string(), "Add at least one showtime");
    }

    #[test]
    fn inverted_showtime_is_rejected_with_its_position() {
        let mut form = base_form();
        form.multi_session = true;
        form.showtimes = vec![
            Showtime {
                start_time: at(12, 14),
                end_time: Some(at(12, 16)),
                ticket_url: None,
                notes: None,
            },
            Showtime {
                start_time: at(12, 19),
                end_time: Some(at(12, 18)),
                ticket_url: None,
                notes: None,
            },
        ];
        assert_eq!(
            validate_and_build_payload(&form, &rules()),
            Err(ValidationError::ShowtimeEndsBeforeStart(2))
        );
    }

    #[test]
    fn overlong_showtime_notes_are_rejected() {
        let mut form = base_form();
        form.multi_session = true;
        form.showtimes = vec![Showtime {
            start_time: at(12, 19),
            end_time: None,
            ticket_url: None,
            notes: Some("x".repeat(MAX_SHOWTIME_NOTES_LEN + 1)),
        }];
        assert_eq!(
            validate_and_build_payload(&form, &rules()),
            Err(ValidationError::ShowtimeNotesTooLong(1))
        );
    }

    #[test]
    fn recurring_on_date_requires_a_future_end_date() {
        let mut form = base_form();
        form.recurrence = Some(RecurrenceInput {
            frequency: Frequency::Weekly,
            end_condition: EndCondition::OnDate,
            end_date: None,
            weekdays: Vec::new(),
        });
        assert_eq!(
            validate_and_build_payload(&form, &rules()),
            Err(ValidationError::RecurrenceEndDateRequired)
        );

        form.recurrence = Some(RecurrenceInput {
            frequency: Frequency::Weekly,
            end_condition: EndCondition::OnDate,
            end_date: NaiveDate::from_ymd_opt(2026, 6, 1),
            weekdays: Vec::new(),
        });
        assert_eq!(
            validate_and_build_payload(&form, &rules()),
            Err(ValidationError::RecurrenceEndBeforeStart)
        );
    }

    #[test]
    fn never_ending_weekly_encodes_without_until() {
        let mut form = base_form();
        form.recurrence = Some(RecurrenceInput {
            frequency: Frequency::Weekly,
            end_condition: EndCondition::Never,
            end_date: None,
            weekdays: Vec::new(),
        });
        let payload = validate_and_build_payload(&form, &rules()).unwrap();
        assert_eq!(payload.recurrence_rule.as_deref(), Some("FREQ=WEEKLY"));
    }

    #[test]
    fn bad_urls_are_rejected() {
        let mut form = base_form();
        form.ticket_url = Some("not a url".to_string());
        assert_eq!(
            validate_and_build_payload(&form, &rules()),
            Err(ValidationError::InvalidUrl("not a url".to_string()))
        );

        form.ticket_url = Some("https://tickets.example.com/folk-night".to_string());
        assert!(validate_and_build_payload(&form, &rules()).is_ok());
    }

    #[test]
    fn first_violated_gate_wins() {
        // Both the venue and the category are missing; the location gate
        // runs first
        let mut form = base_form();
        form.venue_id = None;
        form.category = None;
        assert_eq!(
            validate_and_build_payload(&form, &rules()),
            Err(ValidationError::VenueRequired)
        );
    }

    #[test]
    fn form_parses_from_toml() {
        let form: EventForm = toml::from_str(
            r#"
            title = "Skye Half Marathon"
            category = "sport"
            location_mode = "custom"
            location_name = "Portree Harbour"
            postcode = "IV51 9DB"
            date_start = "2026-06-13T09:00:00"
            no_end_time = true

            [recurrence]
            frequency = "weekly"
            end_condition = "on_date"
            end_date = "2026-08-01"
            "#,
        )
        .unwrap();

        assert_eq!(form.location_mode, LocationMode::Custom);
        assert!(form.no_end_time);
        let recurrence = form.recurrence.as_ref().unwrap();
        assert_eq!(recurrence.frequency, Frequency::Weekly);
        assert!(validate_and_build_payload(&form, &rules()).is_ok());
    }
}
