//! Fixed limits shared across the hub.

/// Generation horizon applied by the event-generation service when a
/// recurring series has no end date ("never" ends).
pub const DEFAULT_GENERATION_HORIZON_DAYS: i64 = 90;

/// Synthesized event duration when the organizer ticks "no specific end time".
pub const OPEN_ENDED_DURATION_HOURS: i64 = 4;

/// Upper bound on uploaded event images, checked before any network call.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Maximum length of the free-text notes on a single showtime.
pub const MAX_SHOWTIME_NOTES_LEN: usize = 255;

/// Cap on locally previewed recurrence occurrences.
pub const MAX_PREVIEW_OCCURRENCES: u16 = 100;
