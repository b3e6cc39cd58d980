//! Error types for the Highland Events Hub core.

use thiserror::Error;

/// Non-validation failures in core operations.
#[derive(Error, Debug)]
pub enum HubError {
    #[error("Recurrence rule error: {0}")]
    RuleParse(String),

    #[error("Calendar export error: {0}")]
    IcsGenerate(String),
}

/// Result type alias for core operations.
pub type HubResult<T> = Result<T, HubError>;

/// A user-correctable problem with an event form.
///
/// The `Display` string of each variant is the message shown to the
/// organizer, so wording here is user-facing copy, not developer copy.
/// Validation never reaches the network: the orchestrator returns the first
/// violated rule and no partial submission is attempted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Enter a title for the event")]
    TitleRequired,

    #[error("Choose a venue for this event")]
    VenueRequired,

    #[error("Enter a name for the event location")]
    LocationNameRequired,

    #[error(
        "That location is outside the Highlands service region. \
         Accepted postcode areas: IV, HS, KW, ZE and parts of PH, PA, AB and KA"
    )]
    OutsideRegion,

    #[error("Add at least one participating venue")]
    ParticipatingVenueRequired,

    #[error("Choose a category for the event")]
    CategoryRequired,

    #[error("End date must be after start date")]
    EndBeforeStart,

    #[error("Add at least one showtime")]
    NoShowtimes,

    #[error("Showtime {0} ends before it starts")]
    ShowtimeEndsBeforeStart(usize),

    #[error("Showtime {0} notes are too long (max 255 characters)")]
    ShowtimeNotesTooLong(usize),

    #[error("Choose an end date for the recurring series")]
    RecurrenceEndDateRequired,

    #[error("The series end date must be after the event start date")]
    RecurrenceEndBeforeStart,

    #[error("'{0}' is not a valid URL")]
    InvalidUrl(String),

    #[error("Only image files can be uploaded")]
    NotAnImage,

    #[error("Image is too large (max 5 MB)")]
    ImageTooLarge,
}
