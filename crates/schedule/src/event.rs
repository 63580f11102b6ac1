use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;

/// IANA zone every timed event is pinned to. The deployment serves a
/// single region, so local times are always interpreted in this zone.
pub const REFERENCE_TZID: &str = "America/New_York";

/// Which reminder an event represents. Alarm offsets differ per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventRole {
    Dose,
    Refill,
}

/// Recurrence frequency. Only monthly schedules are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Monthly,
}

/// RRULE with an occurrence-count bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recurrence {
    pub frequency: Frequency,
    pub count: u32,
}

/// Event bounds. All-day events span one calendar date; timed events
/// last one hour from a local start in [`REFERENCE_TZID`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventWindow {
    AllDay { date: NaiveDate },
    Timed { start: NaiveDateTime },
}

impl EventWindow {
    pub fn is_all_day(&self) -> bool {
        matches!(self, EventWindow::AllDay { .. })
    }

    /// Calendar date the event starts on.
    pub fn start_date(&self) -> NaiveDate {
        match self {
            EventWindow::AllDay { date } => *date,
            EventWindow::Timed { start } => start.date(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmAction {
    Display,
}

/// What the alarm trigger offset is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmRelation {
    Start,
    End,
}

/// A display notification attached to an event, firing at a signed
/// offset from the event start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alarm {
    pub action: AlarmAction,
    pub message: String,
    pub offset: Duration,
    pub relation: AlarmRelation,
}

/// A calendar event produced by the schedule builder.
///
/// `uid` and `created_at` are per-instance identifiers set at build
/// time; they are unrelated to the artifact identifier issued by the
/// sequence issuer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderEvent {
    pub uid: Uuid,
    pub role: EventRole,
    pub title: String,
    pub description: String,
    pub window: EventWindow,
    pub recurrence: Option<Recurrence>,
    pub alarm: Alarm,
    pub categories: Vec<String>,
    pub created_at: DateTime<Utc>,
}
