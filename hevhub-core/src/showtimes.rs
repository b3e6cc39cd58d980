//! Showtimes and canonical-window derivation.
//!
//! Showtimes are edited and compared in the organizer's local wall-clock
//! time (`NaiveDateTime`). Min/max aggregation happens entirely on those
//! naive values; conversion to UTC happens once, at the wire boundary,
//! never during comparison.

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Europe::London;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::event::ShowtimePayload;

/// One concrete occurrence of a multi-session event, in local time.
///
/// An event owns its showtimes in insertion order; display sorts by time,
/// but nothing here reorders them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Showtime {
    pub start_time: NaiveDateTime,
    #[serde(default)]
    pub end_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub ticket_url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Canonical event window in local time, always derived when showtimes
/// exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventWindow {
    pub date_start: NaiveDateTime,
    pub date_end: NaiveDateTime,
}

/// Derive the canonical window from a set of showtimes:
/// `date_start = min(start_time)`, `date_end = max(end_time ?? start_time)`.
///
/// Permutation-invariant and pure. An empty list is a validation error,
/// not a zero window.
pub fn aggregate(showtimes: &[Showtime]) -> Result<EventWindow, ValidationError> {
    let first = showtimes.first().ok_or(ValidationError::NoShowtimes)?;

    let mut date_start = first.start_time;
    let mut date_end = first.end_time.unwrap_or(first.start_time);

    for showtime in &showtimes[1..] {
        date_start = date_start.min(showtime.start_time);
        date_end = date_end.max(showtime.end_time.unwrap_or(showtime.start_time));
    }

    Ok(EventWindow {
        date_start,
        date_end,
    })
}

/// Convert an organizer-local wall-clock time to UTC for the wire.
///
/// DST edges: an ambiguous time (autumn clock change) resolves to the
/// earlier instant; a nonexistent time (spring clock change) is pushed
/// forward an hour.
pub fn local_to_utc(local: NaiveDateTime) -> DateTime<Utc> {
    London
        .from_local_datetime(&local)
        .earliest()
        .or_else(|| {
            London
                .from_local_datetime(&(local + Duration::hours(1)))
                .earliest()
        })
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&local))
}

/// Convert a stored UTC instant back to organizer-local wall-clock time
/// for display and edit forms.
pub fn utc_to_local(instant: DateTime<Utc>) -> NaiveDateTime {
    instant.with_timezone(&London).naive_local()
}

impl Showtime {
    /// Wire form of this showtime, converted to UTC at the boundary.
    pub fn to_payload(&self) -> ShowtimePayload {
        ShowtimePayload {
            start_time: local_to_utc(self.start_time),
            end_time: self.end_time.map(local_to_utc),
            ticket_url: self.ticket_url.clone(),
            notes: self.notes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 6, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn showtime(start: NaiveDateTime, end: Option<NaiveDateTime>) -> Showtime {
        Showtime {
            start_time: start,
            end_time: end,
            ticket_url: None,
            notes: None,
        }
    }

    #[test]
    fn empty_list_is_a_validation_error() {
        assert_eq!(aggregate(&[]), Err(ValidationError::NoShowtimes));
    }

    #[test]
    fn single_showtime_aggregates_to_its_own_bounds() {
        let window = aggregate(&[showtime(at(12, 19, 0), Some(at(12, 21, 0)))]).unwrap();
        assert_eq!(window.date_start, at(12, 19, 0));
        assert_eq!(window.date_end, at(12, 21, 0));

        // No end time: the window collapses to start/start
        let window = aggregate(&[showtime(at(12, 19, 0), None)]).unwrap();
        assert_eq!(window.date_start, at(12, 19, 0));
        assert_eq!(window.date_end, at(12, 19, 0));
    }

    #[test]
    fn same_day_matinee_and_evening_span_both() {
        let window = aggregate(&[
            showtime(at(12, 14, 0), Some(at(12, 16, 0))),
            showtime(at(12, 19, 0), Some(at(12, 21, 0))),
        ])
        .unwrap();
        assert_eq!(window.date_start, at(12, 14, 0));
        assert_eq!(window.date_end, at(12, 21, 0));
    }

    #[test]
    fn missing_end_times_fall_back_to_start_times() {
        let window = aggregate(&[
            showtime(at(10, 20, 0), None),
            showtime(at(14, 18, 0), None),
        ])
        .unwrap();
        assert_eq!(window.date_start, at(10, 20, 0));
        assert_eq!(window.date_end, at(14, 18, 0));
    }

    #[test]
    fn aggregation_is_permutation_invariant() {
        let mut list = vec![
            showtime(at(20, 19, 30), Some(at(20, 22, 0))),
            showtime(at(5, 14, 0), Some(at(5, 16, 0))),
            showtime(at(12, 11, 0), None),
        ];
        let expected = aggregate(&list).unwrap();

        list.rotate_left(1);
        assert_eq!(aggregate(&list).unwrap(), expected);
        list.reverse();
        assert_eq!(aggregate(&list).unwrap(), expected);
    }

    #[test]
    fn equal_timestamps_need_no_special_case() {
        let window = aggregate(&[
            showtime(at(12, 19, 0), Some(at(12, 21, 0))),
            showtime(at(12, 19, 0), Some(at(12, 21, 0))),
        ])
        .unwrap();
        assert_eq!(window.date_start, at(12, 19, 0));
        assert_eq!(window.date_end, at(12, 21, 0));
    }

    #[test]
    fn summer_local_times_convert_to_utc_minus_one() {
        // 19:00 BST is 18:00 UTC
        let utc = local_to_utc(at(12, 19, 0));
        assert_eq!(utc, Utc.with_ymd_and_hms(2026, 6, 12, 18, 0, 0).unwrap());
        assert_eq!(utc_to_local(utc), at(12, 19, 0));
    }

    #[test]
    fn winter_local_times_match_utc() {
        let local = NaiveDate::from_ymd_opt(2026, 1, 10)
            .unwrap()
            .and_hms_opt(19, 0, 0)
            .unwrap();
        assert_eq!(
            local_to_utc(local),
            Utc.with_ymd_and_hms(2026, 1, 10, 19, 0, 0).unwrap()
        );
    }

    #[test]
    fn nonexistent_spring_forward_time_is_pushed_ahead() {
        // The UK springs forward 2026-03-29 01:00 -> 02:00; 01:30 never occurs
        let gap = NaiveDate::from_ymd_opt(2026, 3, 29)
            .unwrap()
            .and_hms_opt(1, 30, 0)
            .unwrap();
        assert_eq!(
            local_to_utc(gap),
            Utc.with_ymd_and_hms(2026, 3, 29, 1, 30, 0).unwrap()
        );
    }
}
