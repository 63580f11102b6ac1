//! Alarm offset policy.
//!
//! All-day events have no intrinsic time of day, so their alarm is
//! pinned a fixed number of hours after midnight on the event date.
//! Timed events use a plain lead-time offset before the start instant.

use chrono::Duration;

use crate::event::{Alarm, AlarmAction, AlarmRelation, EventRole};

/// Build the alarm for an event. Total over role x variant:
///
/// | role   | all-day | timed   |
/// |--------|---------|---------|
/// | Dose   | +12h    | -15min  |
/// | Refill | +10h    | -15min  |
pub fn alarm_for(role: EventRole, all_day: bool, pet_name: &str, product_name: &str) -> Alarm {
    let offset = match (role, all_day) {
        (EventRole::Dose, true) => Duration::hours(12),
        (EventRole::Refill, true) => Duration::hours(10),
        (_, false) => -Duration::minutes(15),
    };

    let message = match role {
        EventRole::Dose => format!("Time to give {} to {}!", product_name, pet_name),
        EventRole::Refill => format!("Order a {} refill for {}", product_name, pet_name),
    };

    Alarm {
        action: AlarmAction::Display,
        message,
        offset,
        relation: AlarmRelation::Start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_day_offsets_are_positive_and_role_distinct() {
        let dose = alarm_for(EventRole::Dose, true, "Daisy", "NexGard");
        let refill = alarm_for(EventRole::Refill, true, "Daisy", "NexGard");

        assert_eq!(dose.offset, Duration::hours(12));
        assert_eq!(refill.offset, Duration::hours(10));
        assert!(dose.offset > Duration::zero());
        assert!(refill.offset > Duration::zero());
        assert_ne!(dose.offset, refill.offset);
    }

    #[test]
    fn timed_offsets_are_fifteen_minutes_before_start() {
        for role in [EventRole::Dose, EventRole::Refill] {
            let alarm = alarm_for(role, false, "Daisy", "NexGard");
            assert_eq!(alarm.offset, -Duration::minutes(15));
            assert!(alarm.offset < Duration::zero());
            assert_eq!(alarm.relation, AlarmRelation::Start);
        }
    }

    #[test]
    fn messages_name_pet_and_product() {
        let dose = alarm_for(EventRole::Dose, true, "Luna", "Heartgard Plus");
        assert_eq!(dose.message, "Time to give Heartgard Plus to Luna!");
        assert_eq!(dose.action, AlarmAction::Display);

        let refill = alarm_for(EventRole::Refill, false, "Luna", "Heartgard Plus");
        assert_eq!(refill.message, "Order a Heartgard Plus refill for Luna");
    }
}
