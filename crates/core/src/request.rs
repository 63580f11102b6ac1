use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A validated medication-dosing request, one per form submission.
///
/// `dose_count >= 12` and `start_date >= today` are enforced by the
/// submitting form, not re-checked downstream. `time_of_day` absent
/// means the schedule is built as all-day events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderRequest {
    pub pet_name: String,
    pub product_name: String,
    pub start_date: NaiveDate,
    /// Number of dosages = number of monthly occurrences.
    pub dose_count: u32,
    pub time_of_day: Option<NaiveTime>,
    pub notes: Option<String>,
}

impl ReminderRequest {
    pub fn is_all_day(&self) -> bool {
        self.time_of_day.is_none()
    }
}
