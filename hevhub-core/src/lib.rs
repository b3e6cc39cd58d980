//! Core types and logic for the Highland Events Hub.
//!
//! This crate provides the scheduling and location-validation logic shared by
//! every surface that submits or edits event listings:
//! - `region` for geofencing submissions to the Highlands service region
//! - `recurrence` for translating recurrence choices to/from rule strings
//! - `showtimes` for deriving the canonical event window from showtimes
//! - `submission` for validating a form and building the Event API payload
//! - `ics` for calendar export
//!
//! Everything here is synchronous and side-effect-free; network calls live in
//! the CLI.

pub mod constants;
pub mod error;
pub mod event;
pub mod ics;
pub mod media;
pub mod recurrence;
pub mod region;
pub mod showtimes;
pub mod submission;

// Re-export the types callers touch most at crate root for convenience
pub use error::{HubError, HubResult, ValidationError};
pub use event::{AgeRestriction, Event, EventLocation, EventPayload, ImageRef, MapPin};
pub use recurrence::{EndCondition, Frequency, RecurrenceInput};
pub use region::RegionRules;
pub use showtimes::{EventWindow, Showtime};
pub use submission::{EventForm, LocationMode, validate_and_build_payload};
