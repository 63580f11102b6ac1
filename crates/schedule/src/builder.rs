//! Turns a [`ReminderRequest`] into a recurring dose event plus a
//! one-off refill event.

use chrono::{Months, NaiveDate, Utc};
use uuid::Uuid;

use pawcal_core::ReminderRequest;

use crate::alarm::alarm_for;
use crate::event::{EventRole, EventWindow, Frequency, Recurrence, ReminderEvent};

/// How many calendar months after the start date the refill falls.
const REFILL_LEAD_MONTHS: u32 = 2;

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("pet name must not be empty")]
    EmptyPetName,

    #[error("date out of supported range: {0}")]
    DateOutOfRange(NaiveDate),
}

/// The two events produced for one request.
#[derive(Debug, Clone)]
pub struct ReminderSchedule {
    pub dose: ReminderEvent,
    pub refill: ReminderEvent,
}

impl ReminderSchedule {
    pub fn into_events(self) -> Vec<ReminderEvent> {
        vec![self.dose, self.refill]
    }
}

pub struct ReminderScheduleBuilder;

impl ReminderScheduleBuilder {
    /// Build the dose and refill events for a request.
    ///
    /// Pure apart from the creation timestamps and fresh event uids.
    /// Only the pet name is validated here; the submitting form owns
    /// the remaining field constraints.
    pub fn build(request: ReminderRequest) -> Result<ReminderSchedule, ScheduleError> {
        if request.pet_name.trim().is_empty() {
            return Err(ScheduleError::EmptyPetName);
        }

        let created_at = Utc::now();

        // dose_count = 0 never passes the form; skip the RRULE rather
        // than emit a COUNT=0 rule calendars reject.
        let recurrence = if request.dose_count > 0 {
            Some(Recurrence {
                frequency: Frequency::Monthly,
                count: request.dose_count,
            })
        } else {
            tracing::warn!(pet = %request.pet_name, "dose_count is 0, emitting single occurrence");
            None
        };

        let dose = ReminderEvent {
            uid: Uuid::new_v4(),
            role: EventRole::Dose,
            title: format!("{} - {}", request.pet_name, request.product_name),
            description: dose_description(&request),
            window: window_on(request.start_date, &request),
            recurrence,
            alarm: alarm_for(
                EventRole::Dose,
                request.is_all_day(),
                &request.pet_name,
                &request.product_name,
            ),
            categories: Vec::new(),
            created_at,
        };

        let refill_date = request
            .start_date
            .checked_add_months(Months::new(REFILL_LEAD_MONTHS))
            .ok_or(ScheduleError::DateOutOfRange(request.start_date))?;

        let refill = ReminderEvent {
            uid: Uuid::new_v4(),
            role: EventRole::Refill,
            title: format!("{} - {} refill", request.pet_name, request.product_name),
            description: refill_description(&request),
            window: window_on(refill_date, &request),
            recurrence: None,
            alarm: alarm_for(
                EventRole::Refill,
                request.is_all_day(),
                &request.pet_name,
                &request.product_name,
            ),
            categories: vec![
                "MEDICATION".to_string(),
                "REFILL".to_string(),
                "PET_CARE".to_string(),
            ],
            created_at,
        };

        Ok(ReminderSchedule { dose, refill })
    }
}

/// The event window on a given date: the refill mirrors the dose
/// variant, reusing the clock time on its own date when present.
fn window_on(date: NaiveDate, request: &ReminderRequest) -> EventWindow {
    match request.time_of_day {
        Some(time) => EventWindow::Timed {
            start: date.and_time(time),
        },
        None => EventWindow::AllDay { date },
    }
}

fn dose_description(request: &ReminderRequest) -> String {
    let mut text = format!(
        "Medication reminder: {}\nPet: {}",
        request.product_name, request.pet_name
    );
    if let Some(notes) = request.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        text.push('\n');
        text.push_str(notes);
    }
    text
}

fn refill_description(request: &ReminderRequest) -> String {
    let mut text = format!(
        "Time to order a refill of {} for {}",
        request.product_name, request.pet_name
    );
    if let Some(notes) = request.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        text.push('\n');
        text.push_str(notes);
    }
    text
}
